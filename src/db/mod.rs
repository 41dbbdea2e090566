pub mod repository;
pub mod sqlite;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },
}

/// Handle to the SQLite database file.
///
/// Each operation opens its own connection via [`Database::connect`] and
/// drops it at scope exit, so concurrent requests never share a connection.
/// Migrations run once, when the handle is created.
#[derive(Clone)]
pub struct Database {
    path: Arc<PathBuf>,
}

impl Database {
    /// Open (creating if needed) and migrate the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref().to_path_buf();
        let conn = sqlite::open_database(&path)?;
        drop(conn);
        Ok(Self {
            path: Arc::new(path),
        })
    }

    /// Open a fresh connection for a single operation.
    pub fn connect(&self) -> Result<Connection, DatabaseError> {
        sqlite::open_connection(&self.path)
    }
}
