//! # FieldForce - field-service workforce backend
//!
//! Tracks employees, their tasks, GPS fixes and emergencies, and turns them
//! into mileage reimbursement, payroll and weekly reports.
//!
//! ## Features
//!
//! - **Mileage**: great-circle distance over an employee's location trail
//! - **Timesheets**: completed-task hours, pay and overtime for a week
//! - **Weekly Reports**: every collection exported as CSV, JSON or Excel
//! - **Backup-gated Cleanup**: purges a week only after its report is confirmed
//! - **Audit Log**: every mutation is recorded with its origin
//! - **HTTP API**: JSON endpoints for field devices and the dashboard
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fieldforce::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
