//! SQLite persistence for fieldforce.
//!
//! One [`db::Db`] handle owns the connection. Each table has a small
//! repository type borrowing that connection, and [`storage`] exposes them to
//! the rest of the crate through the async [`Storage`](crate::libs::storage::Storage)
//! trait.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fieldforce::db::db::Db;
//! use fieldforce::libs::storage::Storage;
//! use fieldforce::libs::employee::NewEmployee;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let db = Db::open_in_memory()?;
//! let employee = db.insert_employee(NewEmployee::new("Ana", "ana@example.com")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! All timestamps are stored as `YYYY-MM-DD HH:MM:SS.mmm` text, which keeps
//! inclusive range filters correct under plain string comparison.

/// Connection handle and database location.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

pub mod emergencies;
pub mod employees;
pub mod locations;
pub mod logs;

/// Field task records and progress updates.
pub mod tasks;

/// Async [`Storage`](crate::libs::storage::Storage) implementation over the repositories.
pub mod storage;
