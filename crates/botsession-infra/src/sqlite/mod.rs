//! SQLite storage layer.
//!
//! Document store backed by SQLite with WAL mode and split read/write
//! connection pools.

pub mod document;
pub mod pool;

pub use document::SqliteDocumentStore;
pub use pool::{default_database_url, SessionPool};
