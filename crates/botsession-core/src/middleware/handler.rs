//! Handler trait for pluggable update processing pipelines.
//!
//! Every pipeline stage implements `UpdateHandler`. Middleware wraps the next
//! stage and is itself a handler, so stages compose by nesting.

use crate::middleware::context::UpdateContext;

/// Trait for processing one incoming update.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition). Errors are
/// `anyhow::Error` so middleware can pass a downstream failure up unchanged.
pub trait UpdateHandler: Send + Sync {
    type Output: Send;

    /// Process the update, reading and mutating `ctx` as needed.
    fn handle(
        &self,
        ctx: &mut UpdateContext,
    ) -> impl std::future::Future<Output = anyhow::Result<Self::Output>> + Send;
}

/// Terminal handler that does nothing.
pub struct NoopHandler;

impl UpdateHandler for NoopHandler {
    type Output = ();

    async fn handle(&self, _ctx: &mut UpdateContext) -> anyhow::Result<()> {
        Ok(())
    }
}
