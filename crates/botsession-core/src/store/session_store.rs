//! Session get/save on top of a document store.
//!
//! Loads always produce a record (`{id: key}` on a miss). Saves write the
//! whole record, or delete it when it has no data fields left.

use std::sync::Arc;

use botsession_types::error::StoreError;
use botsession_types::session::{SessionData, SessionRecord, TableRef};

use super::document_store::DocumentStore;

/// Reads and writes session records in one table of a shared backend.
pub struct SessionStore<D> {
    backend: Arc<D>,
    table: TableRef,
}

impl<D> Clone for SessionStore<D> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            table: self.table.clone(),
        }
    }
}

impl<D: DocumentStore> SessionStore<D> {
    /// Create a session store over `backend`, using `table` for all records.
    pub fn new(backend: Arc<D>, table: TableRef) -> Self {
        Self { backend, table }
    }

    /// The table holding session records.
    pub fn table(&self) -> &TableRef {
        &self.table
    }

    /// The shared backend handle.
    pub fn backend(&self) -> &Arc<D> {
        &self.backend
    }

    /// Load the session for `key`.
    ///
    /// Returns the stored record with its id forced to `key`, or `{id: key}`
    /// when nothing is stored. Backend failures propagate.
    pub async fn get_session(&self, key: &str) -> Result<SessionRecord, StoreError> {
        tracing::debug!(key, table = %self.table, "getting session");
        let record = match self.backend.get(&self.table, key).await? {
            Some(document) => SessionRecord::from_document(key, document),
            None => SessionRecord::empty(key),
        };
        Ok(record)
    }

    /// Persist the session for `key`.
    ///
    /// `None` or an empty field map deletes the whole record (no error if it
    /// is already absent). Anything else is upserted in full as
    /// `{id: key, ...data}`.
    pub async fn save_session(
        &self,
        key: &str,
        data: Option<SessionData>,
    ) -> Result<(), StoreError> {
        let data = match data {
            Some(data) if !data.is_empty() => data,
            _ => {
                tracing::debug!(key, table = %self.table, "deleting session");
                return self.backend.delete(&self.table, key).await;
            }
        };

        tracing::debug!(key, table = %self.table, fields = data.len(), "saving session");
        let record = SessionRecord {
            id: key.to_string(),
            data,
        };
        self.backend.upsert(&self.table, record.into_document()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryDocumentStore;
    use serde_json::{json, Value};

    fn data(value: Value) -> SessionData {
        value.as_object().unwrap().clone()
    }

    fn store() -> (Arc<MemoryDocumentStore>, SessionStore<MemoryDocumentStore>) {
        let table = TableRef::new("test", "_telegraf_sessions");
        let backend = Arc::new(MemoryDocumentStore::with_table(table.clone()));
        (Arc::clone(&backend), SessionStore::new(backend, table))
    }

    #[tokio::test]
    async fn get_missing_returns_default_record() {
        let (_, sessions) = store();
        let record = sessions.get_session("10:20").await.unwrap();
        assert_eq!(record, SessionRecord::empty("10:20"));
    }

    #[tokio::test]
    async fn save_then_get_roundtrip() {
        let (_, sessions) = store();
        let content = data(json!({"name": "Alice", "prefs": {"lang": "en", "tags": [1, 2]}}));
        sessions
            .save_session("10:20", Some(content.clone()))
            .await
            .unwrap();

        let record = sessions.get_session("10:20").await.unwrap();
        assert_eq!(record.id, "10:20");
        assert_eq!(record.data, content);
    }

    #[tokio::test]
    async fn saved_document_is_flat_with_id() {
        let (backend, sessions) = store();
        sessions
            .save_session("1:2", Some(data(json!({"step": 3}))))
            .await
            .unwrap();

        let raw = backend
            .get(sessions.table(), "1:2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(Value::Object(raw), json!({"id": "1:2", "step": 3}));
    }

    #[tokio::test]
    async fn get_forces_id_to_key() {
        let (backend, sessions) = store();
        backend
            .upsert(
                sessions.table(),
                data(json!({"id": "1:2", "step": 3})),
            )
            .await
            .unwrap();

        let record = sessions.get_session("1:2").await.unwrap();
        assert_eq!(record.id, "1:2");
        assert!(!record.data.contains_key("id"));
    }

    #[tokio::test]
    async fn save_empty_deletes_record() {
        let (backend, sessions) = store();
        sessions
            .save_session("k", Some(data(json!({"a": 1}))))
            .await
            .unwrap();

        sessions.save_session("k", Some(SessionData::new())).await.unwrap();

        assert!(backend.is_empty(sessions.table()));
        assert_eq!(
            sessions.get_session("k").await.unwrap(),
            SessionRecord::empty("k")
        );
    }

    #[tokio::test]
    async fn save_absent_deletes_record() {
        let (backend, sessions) = store();
        sessions
            .save_session("k", Some(data(json!({"a": 1}))))
            .await
            .unwrap();

        sessions.save_session("k", None).await.unwrap();
        assert!(backend.is_empty(sessions.table()));
    }

    #[tokio::test]
    async fn save_empty_for_missing_record_is_noop() {
        let (_, sessions) = store();
        sessions.save_session("never-saved", None).await.unwrap();
    }

    #[tokio::test]
    async fn save_replaces_whole_record() {
        let (_, sessions) = store();
        sessions
            .save_session("k", Some(data(json!({"a": 1, "b": 2}))))
            .await
            .unwrap();
        sessions
            .save_session("k", Some(data(json!({"b": 3}))))
            .await
            .unwrap();

        let record = sessions.get_session("k").await.unwrap();
        assert_eq!(record.data, data(json!({"b": 3})));
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let backend = Arc::new(MemoryDocumentStore::new());
        let sessions = SessionStore::new(backend, TableRef::new("test", "missing"));

        assert!(sessions.get_session("k").await.is_err());
        assert!(
            sessions
                .save_session("k", Some(data(json!({"a": 1}))))
                .await
                .is_err()
        );
    }
}
