//! Host persistence pipeline for schema documents.
//!
//! # Responsibility
//! - Run the schema's pre-persist chain before every write.
//! - Store only the fields the schema declares.
//!
//! # Invariants
//! - A failing hook or schema check aborts the write; nothing is stored.
//! - Values written by hooks stay on the in-memory document either way.

use crate::db::DbError;
use crate::model::document::{Document, DocumentId};
use crate::schema::hook::HookError;
use crate::schema::{Schema, SchemaError};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteCollection;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by collection reads and writes.
#[derive(Debug)]
pub enum StoreError {
    Hook(HookError),
    Schema(SchemaError),
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hook(err) => write!(f, "{err}"),
            Self::Schema(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored document: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Hook(err) => Some(err),
            Self::Schema(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<HookError> for StoreError {
    fn from(value: HookError) -> Self {
        Self::Hook(value)
    }
}

impl From<SchemaError> for StoreError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Collection of documents sharing one schema.
pub trait DocumentCollection {
    fn schema(&self) -> &Schema;

    /// Persists `document`, inserting it or replacing the stored copy.
    ///
    /// Pre-persist hooks run first and may mutate `document`.
    fn save(&self, document: &mut Document) -> StoreResult<()>;

    /// Persists a new document and returns it as stored.
    fn create(&self, mut document: Document) -> StoreResult<Document> {
        self.save(&mut document)?;
        Ok(document)
    }

    fn find_by_id(&self, id: DocumentId) -> StoreResult<Option<Document>>;
    fn list(&self) -> StoreResult<Vec<Document>>;
    fn count(&self) -> StoreResult<u64>;

    /// Removes every document of this collection, returning how many.
    fn remove_all(&self) -> StoreResult<usize>;
}
