//! Database schema migration management and versioning system.
//!
//! Provides a migration framework for evolving the database schema over time
//! while keeping existing data intact.
//!
//! ## Features
//!
//! - **Version Tracking**: Maintains records of applied migrations
//! - **Automatic Application**: Runs pending migrations when the database is opened
//! - **Transaction Safety**: All pending migrations run within one transaction
//! - **History Tracking**: Audit trail of schema changes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fieldforce::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("fieldforce.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};
use tracing::info;

/// Tracks every applied migration with its version, name and timestamp.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, applied in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Registers all database migrations in chronological order.
    ///
    /// Timestamps are stored as `YYYY-MM-DD HH:MM:SS.mmm` text so that range
    /// filters compare lexicographically.
    fn register_migrations(&mut self) {
        // Version 1: employees, tasks and location fixes
        self.add_migration(1, "create_core_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS employees (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    role TEXT NOT NULL DEFAULT 'employee',
                    hourly_rate REAL NOT NULL DEFAULT 25,
                    is_active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TEXT NOT NULL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id INTEGER PRIMARY KEY,
                    employee_id INTEGER,
                    title TEXT NOT NULL,
                    description TEXT,
                    customer_name TEXT,
                    customer_phone TEXT,
                    address TEXT,
                    priority INTEGER NOT NULL DEFAULT 1,
                    due_date TEXT,
                    status TEXT NOT NULL DEFAULT 'pending',
                    estimated_hours REAL,
                    actual_hours REAL,
                    created_at TEXT NOT NULL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS locations (
                    id INTEGER PRIMARY KEY,
                    employee_id INTEGER NOT NULL,
                    latitude REAL NOT NULL,
                    longitude REAL NOT NULL,
                    accuracy REAL,
                    timestamp TEXT NOT NULL
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_employee ON tasks(employee_id, status)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_locations_timestamp ON locations(timestamp)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_locations_employee ON locations(employee_id, timestamp)", [])?;
            Ok(())
        });

        // Version 2: append-only activity log
        self.add_migration(2, "add_activity_logs", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS logs (
                    id INTEGER PRIMARY KEY,
                    employee_id INTEGER,
                    employee_name TEXT NOT NULL DEFAULT 'Unknown',
                    action_type TEXT NOT NULL,
                    description TEXT NOT NULL,
                    task_id INTEGER,
                    task_title TEXT,
                    lat REAL,
                    lng REAL,
                    timestamp TEXT NOT NULL,
                    ip_address TEXT,
                    device_info TEXT,
                    details TEXT
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_logs_timestamp ON logs(timestamp)", [])?;
            Ok(())
        });

        // Version 3: emergency alerts
        self.add_migration(3, "add_emergencies", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS emergencies (
                    id INTEGER PRIMARY KEY,
                    employee_id INTEGER,
                    employee_name TEXT,
                    emergency_type TEXT NOT NULL,
                    lat REAL,
                    lng REAL,
                    message TEXT,
                    status TEXT NOT NULL DEFAULT 'active',
                    responded_by INTEGER,
                    created_at TEXT NOT NULL
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_emergencies_created_at ON emergencies(created_at)", [])?;
            Ok(())
        });

        // Version 4: battery level reported alongside each fix
        self.add_migration(4, "add_location_battery_level", |tx| {
            tx.execute("ALTER TABLE locations ADD COLUMN battery_level REAL", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        info!(count = pending.len(), "{}", Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            info!("{}", Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }
        tx.commit()?;
        info!("{}", Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        // A missing migrations table means a fresh database
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));
        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
