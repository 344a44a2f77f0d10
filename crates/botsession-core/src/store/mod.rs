//! Storage abstractions for sessions.
//!
//! - `document_store` -- `DocumentStore` trait every backend implements
//! - `box_store` -- `BoxDocumentStore` for runtime backend selection
//! - `memory` -- `MemoryDocumentStore`, an in-process backend
//! - `session_store` -- `SessionStore`, session get/save on top of a backend

pub mod box_store;
pub mod document_store;
pub mod memory;
pub mod session_store;

pub use box_store::BoxDocumentStore;
pub use document_store::DocumentStore;
pub use memory::MemoryDocumentStore;
pub use session_store::SessionStore;
