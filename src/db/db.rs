use crate::db::migrations::init_with_migrations;
use crate::libs::{config::Config, data_storage::DataStorage};
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "fieldforce.db";

/// Shared handle to the application database.
///
/// Opened once by the process entry point and cloned into every component
/// that needs storage. All clones share one connection; access is serialised
/// by the mutex.
#[derive(Clone)]
pub struct Db {
    pub conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Opens (creating if needed) the database at `path` and applies pending
    /// migrations.
    pub fn open(path: &Path) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        Self::configure(&conn)?;
        init_with_migrations(&mut conn)?;
        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        init_with_migrations(&mut conn)?;
        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens the database configured for this installation.
    pub fn open_configured(config: &Config) -> Result<Db> {
        Self::open(&Self::resolve_path(config)?)
    }

    /// Raw connection without running migrations, for schema inspection.
    pub fn new_without_migrations(config: &Config) -> Result<Connection> {
        Ok(Connection::open(Self::resolve_path(config)?)?)
    }

    pub fn resolve_path(config: &Config) -> Result<PathBuf> {
        match config.database_path() {
            Some(path) => Ok(path),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }
}
