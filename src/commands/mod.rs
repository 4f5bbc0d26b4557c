//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a `cmd`
//! function. [`Cli::menu`] parses the arguments and dispatches.

pub mod cleanup;
pub mod init;
pub mod migrations;
pub mod mileage;
pub mod report;
pub mod savings;
pub mod serve;
pub mod tasks;
pub mod timesheet;

use crate::db::db::Db;
use crate::libs::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP API")]
    Serve(serve::ServeArgs),
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Mileage and reimbursement for an employee", arg_required_else_help = true)]
    Mileage(mileage::MileageArgs),
    #[command(about = "Weekly timesheet and pay for an employee", arg_required_else_help = true)]
    Timesheet(timesheet::TimesheetArgs),
    #[command(about = "Estimated versus actual hours for an employee", arg_required_else_help = true)]
    Savings(savings::SavingsArgs),
    #[command(about = "Build and export the weekly report", arg_required_else_help = true)]
    Report(report::ReportArgs),
    #[command(about = "Delete a backed-up week of operational data", arg_required_else_help = true)]
    Cleanup(cleanup::CleanupArgs),
    #[command(about = "List an employee's tasks", arg_required_else_help = true)]
    Tasks(tasks::TasksArgs),
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Init => init::cmd(),
            Commands::Mileage(args) => mileage::cmd(args).await,
            Commands::Timesheet(args) => timesheet::cmd(args).await,
            Commands::Savings(args) => savings::cmd(args).await,
            Commands::Report(args) => report::cmd(args).await,
            Commands::Cleanup(args) => cleanup::cmd(args).await,
            Commands::Tasks(args) => tasks::cmd(args).await,
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Loads the configuration (file, then environment) and opens its database.
pub(crate) fn open_database() -> Result<(Config, Db)> {
    let config = Config::read()?.with_env_overrides();
    let db = Db::open_configured(&config)?;
    Ok((config, db))
}
