//! Document model core with automatic creation/modification timestamps.
//!
//! Schemas declare fields and own a pre-persist hook chain; the
//! [`timestamp`] plugin adds `createdAt`/`updatedAt` style fields and keeps
//! them current on every save through any [`DocumentCollection`].

pub mod db;
pub mod logging;
pub mod model;
pub mod schema;
pub mod store;
pub mod timestamp;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::{Document, DocumentId};
pub use model::value::FieldValue;
pub use schema::field::{FieldKind, FieldSpec};
pub use schema::hook::{HookError, HookOutcome, Next, PrePersistHook};
pub use schema::{Schema, SchemaError, SchemaPlugin};
pub use store::{DocumentCollection, SqliteCollection, StoreError, StoreResult};
pub use timestamp::{
    timestamps, Clock, SystemClock, TimestampConfig, TimestampHook, TimestampOptions, Timestamps,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
