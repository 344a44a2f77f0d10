//! Idempotent provisioning of the session database and table.
//!
//! `setup()` creates the database, then the table. A create rejected because
//! the target already exists counts as success, so `setup()` can run on every
//! start. Any other failure aborts the remaining steps.

use std::sync::Arc;

use botsession_types::error::{SessionError, StoreError};
use botsession_types::session::TableRef;

use crate::config::SessionConfig;
use crate::store::document_store::DocumentStore;

/// Creates the backing database and table for sessions.
pub struct SchemaProvisioner<D> {
    backend: Arc<D>,
    table: TableRef,
}

impl<D: DocumentStore> SchemaProvisioner<D> {
    pub fn new(backend: Arc<D>, table: TableRef) -> Self {
        Self { backend, table }
    }

    /// Provisioner for the table named by `config`.
    pub fn from_config(backend: Arc<D>, config: &SessionConfig) -> Self {
        Self::new(backend, config.table_ref())
    }

    /// Create the database, then the table.
    ///
    /// # Errors
    ///
    /// `SessionError::Provisioning` with the backend error for any failure
    /// other than "already exists".
    pub async fn setup(&self) -> Result<(), SessionError> {
        let created = self.backend.create_database(&self.table.db).await;
        tolerate_existing(created, "database", &self.table.db)?;

        let created = self.backend.create_table(&self.table).await;
        tolerate_existing(created, "table", &self.table.to_string())?;

        tracing::info!(table = %self.table, "session schema ready");
        Ok(())
    }
}

fn tolerate_existing(
    result: Result<(), StoreError>,
    kind: &str,
    name: &str,
) -> Result<(), SessionError> {
    match result {
        Ok(()) => {
            tracing::debug!(kind, name, "created");
            Ok(())
        }
        Err(err) if err.is_already_exists() => {
            tracing::debug!(kind, name, error = %err, "already exists, keeping it");
            Ok(())
        }
        Err(err) => Err(SessionError::Provisioning(err)),
    }
}
