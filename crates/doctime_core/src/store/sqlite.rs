//! SQLite-backed document collection.

use crate::model::document::{Document, DocumentId};
use crate::model::value::FieldValue;
use crate::schema::Schema;
use crate::store::{DocumentCollection, StoreError, StoreResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Collection stored as JSON bodies in the `documents` table.
///
/// The schema name is the collection key.
pub struct SqliteCollection<'conn> {
    conn: &'conn Connection,
    schema: Arc<Schema>,
}

impl<'conn> SqliteCollection<'conn> {
    pub fn new(conn: &'conn Connection, schema: Arc<Schema>) -> Self {
        Self { conn, schema }
    }

    fn collection(&self) -> &str {
        self.schema.name()
    }
}

impl DocumentCollection for SqliteCollection<'_> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn save(&self, document: &mut Document) -> StoreResult<()> {
        self.schema.run_pre_persist(document)?;
        let stored = self.schema.check(document)?;
        let body = encode_body(&stored)?;

        self.conn.execute(
            "INSERT INTO documents (collection, uuid, body)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (collection, uuid) DO UPDATE SET body = excluded.body;",
            params![self.collection(), document.id().to_string(), body],
        )?;

        debug!(
            "event=document_save module=store status=ok collection={} document={} fields={}",
            self.collection(),
            document.id(),
            stored.len()
        );
        document.replace_fields(stored);
        Ok(())
    }

    fn find_by_id(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND uuid = ?2;",
                params![self.collection(), id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|body| decode_document(id, &body)).transpose()
    }

    fn list(&self) -> StoreResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, body FROM documents WHERE collection = ?1 ORDER BY uuid ASC;",
        )?;
        let mut rows = stmt.query([self.collection()])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get(0)?;
            let id = Uuid::parse_str(&uuid_text).map_err(|_| {
                StoreError::InvalidData(format!("invalid uuid value `{uuid_text}`"))
            })?;
            let body: String = row.get(1)?;
            documents.push(decode_document(id, &body)?);
        }

        Ok(documents)
    }

    fn count(&self) -> StoreResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1;",
            [self.collection()],
            |row| row.get(0),
        )?;
        u64::try_from(count).map_err(|_| StoreError::InvalidData(format!("negative count {count}")))
    }

    fn remove_all(&self) -> StoreResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1;",
            [self.collection()],
        )?;
        debug!(
            "event=document_remove_all module=store status=ok collection={} removed={}",
            self.collection(),
            removed
        );
        Ok(removed)
    }
}

fn encode_body(fields: &BTreeMap<String, FieldValue>) -> StoreResult<String> {
    serde_json::to_string(fields)
        .map_err(|err| StoreError::InvalidData(format!("cannot encode document body: {err}")))
}

fn decode_document(id: DocumentId, body: &str) -> StoreResult<Document> {
    let fields: BTreeMap<String, FieldValue> = serde_json::from_str(body).map_err(|err| {
        StoreError::InvalidData(format!("cannot decode body of document {id}: {err}"))
    })?;
    let mut document = Document::with_id(id);
    document.replace_fields(fields);
    Ok(document)
}
