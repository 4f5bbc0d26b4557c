//! Text of every [`Message`].

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleExport => "Export settings".to_string(),
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptServerHost => "Enter the host to listen on".to_string(),
            Message::PromptServerPort => "Enter the port to listen on".to_string(),
            Message::PromptCorsOrigins => "Enter allowed CORS origins (comma separated)".to_string(),
            Message::PromptDatabasePath => "Enter the database file path".to_string(),
            Message::PromptExportDir => "Enter the report output directory".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerListening(address) => format!("Field service API listening on {}", address),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::DatabaseOpened(path) => format!("Using database {}", path),

            // === BENEFITS MESSAGES ===
            Message::MileageHeader(employee, period) => format!("Mileage for employee {} ({})", employee, period),
            Message::TimesheetHeader(employee, period) => format!("Timesheet for employee {} ({})", employee, period),
            Message::SavingsHeader(employee) => format!("Time savings for employee {}", employee),

            // === TASK MESSAGES ===
            Message::TasksHeader(employee) => format!("Tasks for employee {}", employee),
            Message::PrioritizedTasksHeader(employee) => {
                format!("Suggested order for employee {} (heuristic score, not a route)", employee)
            }
            Message::TasksNotFound => "No tasks found".to_string(),

            // === REPORT MESSAGES ===
            Message::ReportHeader(week) => format!("Weekly report {}", week),
            Message::ReportExported(path) => format!("Report written to {}", path),
            Message::ArchiveCreated(path) => format!("Backup archive created: {}", path),

            // === CLEANUP MESSAGES ===
            Message::ConfirmCleanup(period) => {
                format!("Has the weekly report for {} been backed up? Data will be permanently deleted", period)
            }
            Message::CleanupCancelled => "Cleanup cancelled".to_string(),
            Message::CleanupFailed(error) => format!("Cleanup failed: {}", error),
            Message::CleanupCompleted(tasks, locations, logs) => format!(
                "Weekly data cleaned: {} completed tasks, {} locations, {} logs deleted",
                tasks, locations, logs
            ),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::LatestVersion(version) => format!("Latest available version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsMigration => "Database needs migration. It will be migrated on next start".to_string(),
            Message::MigrationHistoryHeader => "Migration history:".to_string(),
            Message::NoMigrationsApplied => "No migrations have been applied yet".to_string(),
        };
        write!(f, "{}", s)
    }
}
