//! Session middleware.
//!
//! For each update: resolve the key, load the session, install it on the
//! context, run the next stage, then save the final session content.
//!
//! - No key: the next stage runs alone; nothing is loaded or saved.
//! - Load failure: the next stage does not run; the error propagates.
//! - Next stage fails: the session is not saved; the error propagates as-is.
//! - Save runs after every successful next stage, dirty or not.
//!
//! There is no locking between concurrent updates with the same key. The last
//! save wins.

use std::sync::Arc;

use botsession_types::error::SessionError;

use crate::config::SessionConfig;
use crate::middleware::context::UpdateContext;
use crate::middleware::handler::UpdateHandler;
use crate::schema::SchemaProvisioner;
use crate::session::tracked::TrackedSession;
use crate::store::document_store::DocumentStore;
use crate::store::session_store::SessionStore;

/// Loads and saves the session around the next pipeline stage.
pub struct SessionMiddleware<D> {
    store: SessionStore<D>,
    config: SessionConfig,
}

impl<D: DocumentStore> SessionMiddleware<D> {
    /// Create middleware over a shared backend handle.
    pub fn new(backend: Arc<D>, config: SessionConfig) -> Self {
        let store = SessionStore::new(backend, config.table_ref());
        Self { store, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &SessionStore<D> {
        &self.store
    }

    /// Provisioner for this middleware's database and table, sharing its backend.
    pub fn provisioner(&self) -> SchemaProvisioner<D> {
        SchemaProvisioner::new(Arc::clone(self.store.backend()), self.config.table_ref())
    }

    /// Run `next` for `ctx` with the session loaded and saved around it.
    ///
    /// # Errors
    ///
    /// Store failures surface as `SessionError::Store` inside the returned
    /// `anyhow::Error`. Errors from `next` are returned unchanged.
    pub async fn run<H: UpdateHandler>(
        &self,
        ctx: &mut UpdateContext,
        next: &H,
    ) -> anyhow::Result<H::Output> {
        let Some(key) = self.config.resolve_key(ctx) else {
            tracing::trace!(update_id = ctx.update.update_id, "no session key, skipping");
            return next.handle(ctx).await;
        };

        let record = self
            .store
            .get_session(&key)
            .await
            .map_err(SessionError::from)?;
        let property = self.config.property();
        ctx.install_session(property, TrackedSession::from_record(record));

        let output = next.handle(ctx).await?;

        let session = ctx.session(property);
        tracing::debug!(
            key = %key,
            dirty = session.is_some_and(TrackedSession::is_dirty),
            "update handled, persisting session"
        );
        let content = session.map(|s| s.data().clone());
        self.store
            .save_session(&key, content)
            .await
            .map_err(SessionError::from)?;

        Ok(output)
    }

    /// Wrap `next` so every update it handles runs with a session.
    pub fn wrap<H: UpdateHandler>(self, next: H) -> WithSession<D, H> {
        WithSession {
            middleware: self,
            next,
        }
    }
}

/// A handler stage with session middleware in front of it.
pub struct WithSession<D, H> {
    middleware: SessionMiddleware<D>,
    next: H,
}

impl<D, H> WithSession<D, H> {
    pub fn middleware(&self) -> &SessionMiddleware<D> {
        &self.middleware
    }
}

impl<D: DocumentStore, H: UpdateHandler> UpdateHandler for WithSession<D, H> {
    type Output = H::Output;

    async fn handle(&self, ctx: &mut UpdateContext) -> anyhow::Result<H::Output> {
        self.middleware.run(ctx, &self.next).await
    }
}
