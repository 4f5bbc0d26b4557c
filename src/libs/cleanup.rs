//! Destructive weekly cleanup.
//!
//! Removes, for one window: completed tasks, every location fix and every log
//! entry. Employees and emergencies are never touched.
//!
//! The caller must pass `backup_confirmed = true`, asserting that the weekly
//! report for the identical window has already been exported. The flag is
//! trusted as given; no export receipt is checked.
//!
//! The three deletes run concurrently and independently. There is no
//! transaction across them: if one fails after another succeeded the error
//! names both outcomes and nothing is rolled back.

use crate::libs::{
    error::{CollectionOutcome, Error, Result, StorageError},
    storage::Storage,
    window::DateWindow,
};
use serde::Serialize;
use tracing::{info, warn};

pub const BACKUP_REQUIRED: &str = "Backup confirmation required";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletedCounts {
    pub tasks: usize,
    pub locations: usize,
    pub logs: usize,
}

pub struct CleanupCoordinator<'a> {
    storage: &'a dyn Storage,
}

impl<'a> CleanupCoordinator<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Parses the bounds like a weekly report and purges that window.
    ///
    /// The confirmation check runs before the dates are parsed, so an
    /// unconfirmed request never reaches storage.
    pub async fn cleanup(&self, week_start: Option<&str>, week_end: Option<&str>, backup_confirmed: bool) -> Result<DeletedCounts> {
        if !backup_confirmed {
            return Err(Error::Precondition(BACKUP_REQUIRED.to_string()));
        }
        let window = DateWindow::parse_week(week_start, week_end)?;
        self.cleanup_window(window, backup_confirmed).await
    }

    pub async fn cleanup_window(&self, window: DateWindow, backup_confirmed: bool) -> Result<DeletedCounts> {
        if !backup_confirmed {
            return Err(Error::Precondition(BACKUP_REQUIRED.to_string()));
        }

        let (tasks, locations, logs) = tokio::join!(
            self.storage.delete_completed_tasks(window),
            self.storage.delete_locations(window),
            self.storage.delete_logs(window)
        );

        let mut completed = Vec::new();
        let mut failed = Vec::new();
        let mut counts = DeletedCounts::default();
        for (collection, result, slot) in [
            ("tasks", tasks, &mut counts.tasks),
            ("locations", locations, &mut counts.locations),
            ("logs", logs, &mut counts.logs),
        ] {
            match result {
                Ok(n) => {
                    *slot = n;
                    completed.push(CollectionOutcome { collection, detail: format!("{} deleted", n) });
                }
                Err(e) => failed.push(CollectionOutcome { collection, detail: e.to_string() }),
            }
        }

        if !failed.is_empty() {
            warn!(?completed, ?failed, "weekly cleanup partially applied");
            return Err(Error::Storage(StorageError::PartialCleanup { completed, failed }));
        }

        info!(
            start = %window.start_str(),
            end = %window.end_str(),
            tasks = counts.tasks,
            locations = counts.locations,
            logs = counts.logs,
            "weekly data cleaned"
        );
        Ok(counts)
    }
}
