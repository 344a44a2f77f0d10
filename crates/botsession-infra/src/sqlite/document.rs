//! SQLite document store implementation.
//!
//! Implements `DocumentStore` from `botsession-core` on top of a
//! [`SessionPool`]. Every table holds `(id, document)` rows, where
//! `document` is the full JSON object as text.

use botsession_core::store::document_store::{document_id, DocumentStore};
use botsession_types::error::StoreError;
use botsession_types::session::{is_valid_identifier, Document, TableRef};
use sqlx::Row;

use super::pool::{physical_table, store_error, SessionPool};

/// SQLite-backed implementation of `DocumentStore`.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SessionPool,
}

impl SqliteDocumentStore {
    /// Create a new document store over an open session pool.
    pub fn new(pool: SessionPool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        Ok(Self::new(SessionPool::open(database_url).await?))
    }

    pub fn pool(&self) -> &SessionPool {
        &self.pool
    }
}

fn parse_document(text: &str) -> Result<Document, StoreError> {
    match serde_json::from_str(text) {
        Ok(serde_json::Value::Object(document)) => Ok(document),
        Ok(_) => Err(StoreError::Query("stored document is not a JSON object".to_string())),
        Err(e) => Err(StoreError::Query(format!("invalid JSON document: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// DocumentStore implementation
// ---------------------------------------------------------------------------

impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, table: &TableRef, key: &str) -> Result<Option<Document>, StoreError> {
        let sql = format!("SELECT document FROM {} WHERE id = ?", physical_table(table)?);
        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(self.pool.reader())
            .await
            .map_err(store_error)?;

        match row {
            Some(row) => {
                let text: String = row.try_get("document").map_err(store_error)?;
                Ok(Some(parse_document(&text)?))
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, table: &TableRef, document: Document) -> Result<(), StoreError> {
        let sql = format!(
            r#"INSERT INTO {} (id, document) VALUES (?, ?)
               ON CONFLICT (id) DO UPDATE SET document = excluded.document"#,
            physical_table(table)?
        );
        let id = document_id(&document)?;
        let text = serde_json::to_string(&document)
            .map_err(|e| StoreError::Query(format!("failed to serialize document: {e}")))?;

        sqlx::query(&sql)
            .bind(id)
            .bind(&text)
            .execute(self.pool.writer())
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn delete(&self, table: &TableRef, key: &str) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", physical_table(table)?);
        sqlx::query(&sql)
            .bind(key)
            .execute(self.pool.writer())
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn create_database(&self, name: &str) -> Result<(), StoreError> {
        if !is_valid_identifier(name) {
            return Err(StoreError::Schema(format!("invalid database name '{name}'")));
        }

        if self.pool.register_database(name).await? {
            tracing::debug!(db = name, "registered database");
            Ok(())
        } else {
            Err(StoreError::Schema(format!("Database `{name}` already exists.")))
        }
    }

    async fn create_table(&self, table: &TableRef) -> Result<(), StoreError> {
        let physical = physical_table(table)?;
        if !self.pool.has_database(&table.db).await? {
            return Err(StoreError::Schema(format!(
                "Database `{}` does not exist.",
                table.db
            )));
        }

        let sql = format!(
            "CREATE TABLE {physical} (id TEXT PRIMARY KEY NOT NULL, document TEXT NOT NULL)"
        );
        match sqlx::query(&sql).execute(self.pool.writer()).await {
            Ok(_) => Ok(()),
            // SQLite reports "table ... already exists".
            Err(sqlx::Error::Database(db_err)) => {
                Err(StoreError::Schema(db_err.message().to_string()))
            }
            Err(e) => Err(store_error(e)),
        }
    }
}
