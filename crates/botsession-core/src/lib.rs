//! Session lifecycle and store trait definitions for bot session persistence.
//!
//! This crate defines the `DocumentStore` port that backends implement, plus
//! the logic that sits on top of it: loading and saving session records,
//! tracking field changes during one update, the session middleware, and
//! schema provisioning. It depends only on `botsession-types` -- never on
//! `botsession-infra` or any database crate.

pub mod config;
pub mod middleware;
pub mod schema;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use middleware::{SessionMiddleware, UpdateContext, UpdateHandler, WithSession};
pub use schema::SchemaProvisioner;
pub use session::{ChangeSet, TrackedSession};
pub use store::{DocumentStore, SessionStore};
