//! BoxDocumentStore -- object-safe dynamic dispatch wrapper for DocumentStore.
//!
//! Same blanket-impl pattern used for other RPITIT traits:
//! 1. Define an object-safe `DocumentStoreDyn` trait with boxed futures
//! 2. Blanket-impl `DocumentStoreDyn` for all `T: DocumentStore`
//! 3. `BoxDocumentStore` wraps `Box<dyn DocumentStoreDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use botsession_types::error::StoreError;
use botsession_types::session::{Document, TableRef};

use super::document_store::DocumentStore;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`DocumentStore`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch (`dyn DocumentStoreDyn`).
/// A blanket implementation is provided for all types implementing `DocumentStore`.
pub trait DocumentStoreDyn: Send + Sync {
    fn get_boxed<'a>(
        &'a self,
        table: &'a TableRef,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<Document>, StoreError>>;

    fn upsert_boxed<'a>(
        &'a self,
        table: &'a TableRef,
        document: Document,
    ) -> BoxFuture<'a, Result<(), StoreError>>;

    fn delete_boxed<'a>(
        &'a self,
        table: &'a TableRef,
        key: &'a str,
    ) -> BoxFuture<'a, Result<(), StoreError>>;

    fn create_database_boxed<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;

    fn create_table_boxed<'a>(
        &'a self,
        table: &'a TableRef,
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// Blanket implementation: any `DocumentStore` automatically implements `DocumentStoreDyn`.
impl<T: DocumentStore> DocumentStoreDyn for T {
    fn get_boxed<'a>(
        &'a self,
        table: &'a TableRef,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<Document>, StoreError>> {
        Box::pin(self.get(table, key))
    }

    fn upsert_boxed<'a>(
        &'a self,
        table: &'a TableRef,
        document: Document,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.upsert(table, document))
    }

    fn delete_boxed<'a>(
        &'a self,
        table: &'a TableRef,
        key: &'a str,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.delete(table, key))
    }

    fn create_database_boxed<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.create_database(name))
    }

    fn create_table_boxed<'a>(
        &'a self,
        table: &'a TableRef,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.create_table(table))
    }
}

/// Type-erased document store for runtime backend selection.
///
/// Since `DocumentStore` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxDocumentStore` implements `DocumentStore` itself by
/// delegating to the inner `DocumentStoreDyn` trait object, so it can be
/// handed to `SessionStore` or `SchemaProvisioner` like any backend.
pub struct BoxDocumentStore {
    inner: Box<dyn DocumentStoreDyn + Send + Sync>,
}

impl BoxDocumentStore {
    /// Wrap a concrete `DocumentStore` in a type-erased box.
    pub fn new<T: DocumentStore + 'static>(store: T) -> Self {
        Self {
            inner: Box::new(store),
        }
    }
}

impl DocumentStore for BoxDocumentStore {
    async fn get(&self, table: &TableRef, key: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get_boxed(table, key).await
    }

    async fn upsert(&self, table: &TableRef, document: Document) -> Result<(), StoreError> {
        self.inner.upsert_boxed(table, document).await
    }

    async fn delete(&self, table: &TableRef, key: &str) -> Result<(), StoreError> {
        self.inner.delete_boxed(table, key).await
    }

    async fn create_database(&self, name: &str) -> Result<(), StoreError> {
        self.inner.create_database_boxed(name).await
    }

    async fn create_table(&self, table: &TableRef) -> Result<(), StoreError> {
        self.inner.create_table_boxed(table).await
    }
}
