//! Results store core implementation.
//!
//! Contains the ResultsStore struct and its connection handling.

use super::schema::init_schema;
use crate::storage::sqlite::types::ModelOutputs;
use crate::storage::{Result, StorageError};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};

/// SQLite-backed results store
///
/// Holds no connection between calls: each operation opens the file,
/// ensures the schema, does its work and drops the connection on every exit
/// path.
#[derive(Debug, Clone)]
pub struct ResultsStore {
    pub(crate) path: PathBuf,
    pub(crate) outputs: ModelOutputs,
}

impl ResultsStore {
    /// Create a store handle for the database at `path`
    ///
    /// Nothing is opened until the first operation.
    pub fn new<P: AsRef<Path>>(path: P, outputs: ModelOutputs) -> Self {
        Self { path: path.as_ref().to_path_buf(), outputs }
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the model output locations
    pub fn outputs(&self) -> &ModelOutputs {
        &self.outputs
    }

    /// Open a connection and make sure the schema exists
    pub(crate) fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| StorageError::Unavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        init_schema(&conn).map_err(|e| StorageError::Unavailable {
            path: self.path.clone(),
            reason: format!("schema initialization failed: {e}"),
        })?;
        Ok(conn)
    }

    /// Map a failed write to a storage error.
    ///
    /// A store that refuses writes (read-only, full, locked or failing at the
    /// I/O layer) is unavailable; any other failure is a query error.
    pub(crate) fn write_failure(&self, what: &str, e: rusqlite::Error) -> StorageError {
        use rusqlite::ErrorCode::*;
        match e.sqlite_error_code() {
            Some(
                ReadOnly | DiskFull | CannotOpen | PermissionDenied | SystemIoFailure
                | DatabaseBusy | DatabaseLocked,
            ) => StorageError::Unavailable {
                path: self.path.clone(),
                reason: format!("{what}: {e}"),
            },
            _ => StorageError::Query(format!("{what}: {e}")),
        }
    }

    /// Whether `name` is a table in this store
    ///
    /// A missing or unreadable store counts as "table absent".
    pub fn table_exists(&self, name: &str) -> bool {
        table_exists(&self.path, name)
    }
}

/// Whether the SQLite file at `db_path` contains a table called `name`.
///
/// Never creates the file. Returns `false` when the file is absent or cannot
/// be opened.
pub fn table_exists(db_path: &Path, name: &str) -> bool {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = match Connection::open_with_flags(db_path, flags) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::debug!(path = %db_path.display(), error = %e, "store not openable");
            return false;
        }
    };
    table_exists_in(&conn, name).unwrap_or(false)
}

pub(crate) fn table_exists_in(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
        [name],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::Query(format!("Invalid timestamp {raw:?}: {e}")))
}
