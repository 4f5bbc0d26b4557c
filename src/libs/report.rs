//! Weekly report generation.
//!
//! A report covers one inclusive window, with its end bound lifted to the end of
//! the day (see [`DateWindow::parse_week`]). Building one:
//!
//! 1. Reads tasks, locations, logs, active employees and emergencies at the
//!    same time. Any failed read fails the whole report; partial reports are
//!    never returned.
//! 2. Sums the distance across the whole location set. The fixes of all
//!    employees are bundled into one timestamp-ordered run, so jumps between
//!    employees count as travelled distance.
//! 3. Renders each collection plus a one-row summary to CSV.
//!
//! Summaries are computed fresh on every request and never stored.

use crate::libs::{
    error::Result,
    export::{Collection, ExportTable},
    formatter::format_fixed,
    mileage,
    storage::Storage,
    window::{self, DateWindow},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub week_number: String,
    pub week_start: NaiveDateTime,
    pub week_end: NaiveDateTime,
    pub total_employees: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_locations: usize,
    pub total_logs: usize,
    pub emergencies: usize,
    /// Miles with two decimals.
    pub total_mileage: String,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    #[serde(rename = "weekly_report")]
    pub summary: WeeklySummary,
    /// CSV text per collection, keyed by [`Collection::name`].
    pub files: BTreeMap<String, String>,
    #[serde(skip)]
    pub tables: Vec<ExportTable>,
}

pub struct WeeklyReportBuilder<'a> {
    storage: &'a dyn Storage,
}

impl<'a> WeeklyReportBuilder<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Parses both bounds and builds the report for that window.
    pub async fn build(&self, week_start: Option<&str>, week_end: Option<&str>) -> Result<WeeklyReport> {
        let window = DateWindow::parse_week(week_start, week_end)?;
        self.build_window(window).await
    }

    pub async fn build_window(&self, window: DateWindow) -> Result<WeeklyReport> {
        debug!(start = %window.start_str(), end = %window.end_str(), "building weekly report");

        let (tasks, locations, logs, employees, emergencies) = tokio::try_join!(
            self.storage.tasks_in_window(window),
            self.storage.locations_in_window(window),
            self.storage.logs_in_window(window),
            self.storage.active_employees(),
            self.storage.emergencies_in_window(window)
        )?;

        let summary = WeeklySummary {
            week_number: window.week_label(),
            week_start: window.start,
            week_end: window.end,
            total_employees: employees.len(),
            total_tasks: tasks.len(),
            completed_tasks: tasks.iter().filter(|t| t.is_completed()).count(),
            total_locations: locations.len(),
            total_logs: logs.len(),
            emergencies: emergencies.len(),
            total_mileage: format_fixed(mileage::total_miles(&locations), 2),
            generated_at: window::now(),
        };

        let tables = vec![
            ExportTable::from_records(&tasks),
            ExportTable::from_records(&locations),
            ExportTable::from_records(&logs),
            ExportTable::from_records(&employees),
            ExportTable::from_records(&emergencies),
            ExportTable::from_records(std::slice::from_ref(&summary)),
        ];

        let mut files = BTreeMap::new();
        for table in &tables {
            files.insert(table.collection.name().to_string(), table.to_csv()?);
        }
        debug_assert_eq!(files.len(), Collection::ALL.len());

        info!(
            week = %summary.week_number,
            tasks = summary.total_tasks,
            locations = summary.total_locations,
            mileage = %summary.total_mileage,
            "weekly report generated"
        );

        Ok(WeeklyReport { summary, files, tables })
    }
}
