//! In-process document store.
//!
//! `MemoryDocumentStore` keeps databases and tables in `DashMap`s. It reports
//! errors with the same messages a document database would (`already exists`,
//! `does not exist`) so provisioning behaves the same as against a server.
//! No `DashMap` guard is held across an await point.

use std::collections::HashMap;

use botsession_types::error::StoreError;
use botsession_types::session::{Document, TableRef};
use dashmap::{DashMap, DashSet};

use super::document_store::{document_id, DocumentStore};

/// Concurrent in-memory document store.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    databases: DashSet<String>,
    tables: DashMap<TableRef, HashMap<String, Document>>,
}

impl MemoryDocumentStore {
    /// Create an empty store with no databases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `table` (and its database) already provisioned.
    pub fn with_table(table: TableRef) -> Self {
        let store = Self::new();
        store.databases.insert(table.db.clone());
        store.tables.insert(table, HashMap::new());
        store
    }

    /// Number of documents in `table`, or 0 if the table does not exist.
    pub fn len(&self, table: &TableRef) -> usize {
        self.tables.get(table).map(|docs| docs.len()).unwrap_or(0)
    }

    /// Whether `table` holds no documents.
    pub fn is_empty(&self, table: &TableRef) -> bool {
        self.len(table) == 0
    }

    fn missing_table(table: &TableRef) -> StoreError {
        StoreError::Query(format!("Table `{table}` does not exist."))
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, table: &TableRef, key: &str) -> Result<Option<Document>, StoreError> {
        let docs = self
            .tables
            .get(table)
            .ok_or_else(|| Self::missing_table(table))?;
        Ok(docs.get(key).cloned())
    }

    async fn upsert(&self, table: &TableRef, document: Document) -> Result<(), StoreError> {
        let id = document_id(&document)?.to_string();
        let mut docs = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Self::missing_table(table))?;
        docs.insert(id, document);
        Ok(())
    }

    async fn delete(&self, table: &TableRef, key: &str) -> Result<(), StoreError> {
        let mut docs = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Self::missing_table(table))?;
        docs.remove(key);
        Ok(())
    }

    async fn create_database(&self, name: &str) -> Result<(), StoreError> {
        if !self.databases.insert(name.to_string()) {
            return Err(StoreError::Schema(format!(
                "Database `{name}` already exists."
            )));
        }
        Ok(())
    }

    async fn create_table(&self, table: &TableRef) -> Result<(), StoreError> {
        if !self.databases.contains(&table.db) {
            return Err(StoreError::Schema(format!(
                "Database `{}` does not exist.",
                table.db
            )));
        }
        match self.tables.entry(table.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::Schema(format!(
                "Table `{table}` already exists."
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(HashMap::new());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    fn sessions() -> TableRef {
        TableRef::new("test", "_telegraf_sessions")
    }

    #[tokio::test]
    async fn upsert_get_roundtrip() {
        let store = MemoryDocumentStore::with_table(sessions());
        let d = doc(json!({"id": "1:2", "name": "Alice"}));
        store.upsert(&sessions(), d.clone()).await.unwrap();

        assert_eq!(store.get(&sessions(), "1:2").await.unwrap(), Some(d));
        assert_eq!(store.len(&sessions()), 1);
    }

    #[tokio::test]
    async fn upsert_replaces_whole_document() {
        let store = MemoryDocumentStore::with_table(sessions());
        store
            .upsert(&sessions(), doc(json!({"id": "k", "a": 1, "b": 2})))
            .await
            .unwrap();
        store
            .upsert(&sessions(), doc(json!({"id": "k", "a": 3})))
            .await
            .unwrap();

        let got = store.get(&sessions(), "k").await.unwrap().unwrap();
        assert_eq!(got, doc(json!({"id": "k", "a": 3})));
    }

    #[tokio::test]
    async fn upsert_without_id_fails() {
        let store = MemoryDocumentStore::with_table(sessions());
        let err = store
            .upsert(&sessions(), doc(json!({"a": 1})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn delete_missing_is_noop() {
        let store = MemoryDocumentStore::with_table(sessions());
        store.delete(&sessions(), "nope").await.unwrap();
        assert!(store.is_empty(&sessions()));
    }

    #[tokio::test]
    async fn operations_on_missing_table_fail() {
        let store = MemoryDocumentStore::new();
        let err = store.get(&sessions(), "k").await.unwrap_err();
        assert!(err.message().contains("does not exist"));
        assert!(store.delete(&sessions(), "k").await.is_err());
    }

    #[tokio::test]
    async fn create_database_twice_reports_already_exists() {
        let store = MemoryDocumentStore::new();
        store.create_database("test").await.unwrap();
        let err = store.create_database("test").await.unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn create_table_requires_database() {
        let store = MemoryDocumentStore::new();
        let err = store.create_table(&sessions()).await.unwrap_err();
        assert!(err.message().contains("does not exist"));
        assert!(!err.is_already_exists());
    }

    #[tokio::test]
    async fn create_table_twice_reports_already_exists() {
        let store = MemoryDocumentStore::new();
        store.create_database("test").await.unwrap();
        store.create_table(&sessions()).await.unwrap();
        let err = store.create_table(&sessions()).await.unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn tables_are_isolated_by_database() {
        let store = MemoryDocumentStore::new();
        store.create_database("a").await.unwrap();
        store.create_database("b").await.unwrap();
        let in_a = TableRef::new("a", "s");
        let in_b = TableRef::new("b", "s");
        store.create_table(&in_a).await.unwrap();
        store.create_table(&in_b).await.unwrap();

        store.upsert(&in_a, doc(json!({"id": "k"}))).await.unwrap();
        assert!(store.get(&in_b, "k").await.unwrap().is_none());
    }
}
