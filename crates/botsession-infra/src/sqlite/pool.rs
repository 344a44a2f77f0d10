//! Connection pools and catalog for the SQLite session database.
//!
//! A single SQLite file stands in for a whole document server: logical
//! databases are rows in the `_session_databases` catalog and every logical
//! table `db.table` is a physical table literally named `"db.table"`.
//! Reads go through a shared read-only pool, writes and DDL through a
//! single writer connection.

use std::str::FromStr;
use std::time::Duration;

use botsession_types::error::StoreError;
use botsession_types::session::{is_valid_identifier, TableRef};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

const READER_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader and writer pools over one session database file.
#[derive(Clone)]
pub struct SessionPool {
    reader: SqlitePool,
    writer: SqlitePool,
}

impl SessionPool {
    /// Open the session database at `database_url`, creating the file and
    /// the database catalog when missing.
    pub async fn open(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(connection_error)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .map_err(connection_error)?;

        // The catalog must exist before a read-only connection can see it.
        sqlx::migrate!("../../migrations")
            .run(&writer)
            .await
            .map_err(|e| StoreError::Schema(format!("session catalog migration failed: {e}")))?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await
            .map_err(connection_error)?;

        tracing::debug!(url = database_url, "opened session database");
        Ok(Self { reader, writer })
    }

    pub(crate) fn reader(&self) -> &SqlitePool {
        &self.reader
    }

    pub(crate) fn writer(&self) -> &SqlitePool {
        &self.writer
    }

    /// Whether the logical database `name` has been created.
    pub async fn has_database(&self, name: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM _session_databases WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.writer)
            .await
            .map_err(store_error)?;
        Ok(row.is_some())
    }

    /// Add `name` to the catalog. Returns `false` when it was already there.
    pub async fn register_database(&self, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("INSERT OR IGNORE INTO _session_databases (name) VALUES (?)")
            .bind(name)
            .execute(&self.writer)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() == 1)
    }

    /// Close both pools, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.writer.close().await;
        self.reader.close().await;
    }
}

/// Quoted physical table name for `table`: `"db.table"`.
///
/// Both parts are restricted to `[A-Za-z0-9_]`, so the `.` separator is
/// unambiguous and the quoting cannot be escaped.
pub(crate) fn physical_table(table: &TableRef) -> Result<String, StoreError> {
    for name in [&table.db, &table.table] {
        if !is_valid_identifier(name) {
            return Err(StoreError::Query(format!(
                "invalid identifier '{name}': use letters, digits and '_'"
            )));
        }
    }
    Ok(format!("\"{}.{}\"", table.db, table.table))
}

pub(crate) fn store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Connection(e.to_string())
        }
        _ => StoreError::Query(e.to_string()),
    }
}

fn connection_error(e: sqlx::Error) -> StoreError {
    StoreError::Connection(e.to_string())
}

/// `BOTSESSION_DATA_DIR/sessions.db`, or `~/.botsession/sessions.db`.
pub fn default_database_url() -> String {
    let data_dir = std::env::var("BOTSESSION_DATA_DIR").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{home}/.botsession")
    });
    format!("sqlite://{data_dir}/sessions.db")
}
