pub mod queries;

pub use queries::VideoBatch;

use rusqlite::{Connection, OpenFlags};
use std::env;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database not found: {0}")]
    DatabaseNotFound(String),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Resolves the database path from the environment, falling back to the
/// collector bot's default file name in the working directory.
pub fn default_db_path() -> String {
    env::var("TRENDX_DB_PATH").unwrap_or_else(|_| "trendx_bot.db".to_string())
}

/// Read-only handle on the collector bot's SQLite database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens an existing database. The dashboard never creates one, so a
    /// missing file is an error rather than an empty database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Store, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::DatabaseNotFound(path.display().to_string()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Store { conn })
    }

    /// In-memory database, used by tests to seed fixtures.
    pub fn open_in_memory() -> Result<Store, StoreError> {
        Ok(Store {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
