//! Document store trait.
//!
//! Defines the interface for a flat, id-keyed document backend.
//! Implementations live in this crate (`MemoryDocumentStore`) and in
//! botsession-infra (`SqliteDocumentStore`).

use botsession_types::error::StoreError;
use botsession_types::session::{Document, TableRef};

/// Trait for id-keyed JSON document storage.
///
/// Every document carries a string `id` field that is unique within its table.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait DocumentStore: Send + Sync {
    /// Get a document by id. Returns None if no document has that id.
    fn get(
        &self,
        table: &TableRef,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Insert a document, replacing any existing document with the same id.
    ///
    /// Fails with `StoreError::Query` if the document has no string `id`.
    fn upsert(
        &self,
        table: &TableRef,
        document: Document,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Delete a document by id. No-op if it does not exist.
    fn delete(
        &self,
        table: &TableRef,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Create a database.
    ///
    /// A duplicate create fails with an error whose message contains
    /// `already exists`.
    fn create_database(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Create a table inside an existing database.
    ///
    /// A duplicate create fails with an error whose message contains
    /// `already exists`.
    fn create_table(
        &self,
        table: &TableRef,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Extract the string `id` of a document about to be written.
pub fn document_id(document: &Document) -> Result<&str, StoreError> {
    document
        .get(botsession_types::session::ID_FIELD)
        .and_then(|id| id.as_str())
        .ok_or_else(|| StoreError::Query("document is missing a string `id` field".to_string()))
}
