//! Record instance handled by the persist pipeline.
//!
//! # Responsibility
//! - Hold field values by name for one stored record.
//! - Give hooks get/set-by-name access without knowing the record type.
//!
//! # Invariants
//! - `id` is stable for the lifetime of the record and never reused.
//! - `get` returns `None` only for fields that were never set or were unset.

use crate::model::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier for a stored document.
pub type DocumentId = Uuid;

/// In-memory document about to be, or already, persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Creates an empty document with a generated id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty document with a caller-provided id.
    ///
    /// Used by stores when rebuilding a document read back from storage.
    pub fn with_id(id: DocumentId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Creates a document with a generated id and the given fields.
    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut document = Self::new();
        for (name, value) in fields {
            document.set(name, value);
        }
        document
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Overwrites (or inserts) one field value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Removes one field, returning its previous value.
    pub fn unset(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub(crate) fn replace_fields(&mut self, fields: BTreeMap<String, FieldValue>) {
        self.fields = fields;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::model::value::FieldValue;

    #[test]
    fn set_overwrites_and_unset_removes() {
        let mut document = Document::from_fields([("title", "draft")]);
        document.set("title", "final");
        assert_eq!(document.get("title").and_then(FieldValue::as_str), Some("final"));

        assert!(document.unset("title").is_some());
        assert!(document.get("title").is_none());
        assert!(!document.contains("title"));
    }

    #[test]
    fn explicit_null_is_visible() {
        let mut document = Document::new();
        document.set("archived_at", FieldValue::Null);
        assert_eq!(document.get("archived_at"), Some(&FieldValue::Null));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(Document::new().id(), Document::new().id());
    }
}
