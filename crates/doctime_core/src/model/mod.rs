//! In-memory record model shared by schema, hooks and stores.
//!
//! # Responsibility
//! - Define the record instance that pre-persist hooks read and write.
//! - Define the tagged field value carried by every record field.
//!
//! # Invariants
//! - Every document is identified by a stable `DocumentId`.
//! - Field lookup is by name; a field never set is distinct from `Null`.

pub mod document;
pub mod value;
