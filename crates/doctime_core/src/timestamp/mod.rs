//! Automatic creation/modification timestamps for schema documents.
//!
//! # Responsibility
//! - Resolve partial caller options into one immutable configuration.
//! - Declare the enabled timestamp fields on a schema.
//! - Register the pre-persist hook that writes them.
//!
//! # Invariants
//! - The updated field is overwritten on every persist when enabled.
//! - The created field is written only while it is absent or null, so it
//!   keeps its first-persist value for the lifetime of the document.
//! - Configuration is captured by the hook; there is no process-wide state.
//!
//! First persistence is detected by the created field being unset. Code that
//! clears or never declares that field defeats the detection.

pub mod clock;
pub mod config;
mod plugin;

pub use clock::{Clock, SystemClock};
pub use config::{
    TimestampConfig, TimestampOptions, DEFAULT_CREATED_NAME, DEFAULT_UPDATED_NAME,
};
pub use plugin::{timestamps, TimestampHook, Timestamps};
