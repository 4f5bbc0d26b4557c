/// Every user-facing message the application prints.
///
/// Text lives in the `Display` impl in [`super::display`].
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleServer,
    ConfigModuleDatabase,
    ConfigModuleExport,
    PromptSelectModules,
    PromptServerHost,
    PromptServerPort,
    PromptCorsOrigins,
    PromptDatabasePath,
    PromptExportDir,

    // === SERVER MESSAGES ===
    ServerListening(String), // address
    ServerStopped,
    DatabaseOpened(String), // path

    // === BENEFITS MESSAGES ===
    MileageHeader(i64, String),   // employee, period
    TimesheetHeader(i64, String), // employee, period
    SavingsHeader(i64),

    // === TASK MESSAGES ===
    TasksHeader(i64),
    PrioritizedTasksHeader(i64),
    TasksNotFound,

    // === REPORT MESSAGES ===
    ReportHeader(String), // week number
    ReportExported(String),
    ArchiveCreated(String),

    // === CLEANUP MESSAGES ===
    ConfirmCleanup(String), // period
    CleanupCancelled,
    CleanupCompleted(usize, usize, usize), // tasks, locations, logs
    CleanupFailed(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    LatestVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsMigration,
    MigrationHistoryHeader,
    NoMigrationsApplied,
}
