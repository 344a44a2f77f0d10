//! Update handling pipeline with session support.
//!
//! - `context` -- `UpdateContext`, the per-update state handed down the chain
//! - `handler` -- `UpdateHandler` trait implemented by every pipeline stage
//! - `session` -- `SessionMiddleware`, which loads and saves the session around the next stage

pub mod context;
pub mod handler;
pub mod session;

pub use context::UpdateContext;
pub use handler::UpdateHandler;
pub use session::{SessionMiddleware, WithSession};
