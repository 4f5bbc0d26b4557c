//! Core library modules for fieldforce.
//!
//! ## Features
//!
//! - **Records**: employees, tasks, location fixes, emergencies, activity logs
//! - **Benefits**: mileage reimbursement, weekly timesheet, time savings
//! - **Reporting**: weekly report with per-collection CSV, on-disk export, backup archive
//! - **Retention**: backup-gated weekly cleanup
//! - **Infrastructure**: configuration, data storage, messaging, console views
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fieldforce::db::db::Db;
//! use fieldforce::libs::benefits;
//! use fieldforce::libs::window::DateWindow;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let db = Db::open_in_memory()?;
//! let window = DateWindow::parse(Some("2024-01-01"), Some("2024-01-07"))?;
//! let mileage = benefits::mileage(&db, 7, window).await?;
//! println!("{:.2} miles", mileage.total_miles);
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod audit;
pub mod backup;
pub mod benefits;
pub mod cleanup;
pub mod config;
pub mod data_storage;
pub mod emergency;
pub mod employee;
pub mod error;
pub mod export;
pub mod formatter;
pub mod geo;
pub mod location;
pub mod messages;
pub mod mileage;
pub mod priority;
pub mod report;
pub mod savings;
pub mod storage;
pub mod task;
pub mod timesheet;
pub mod view;
pub mod window;
