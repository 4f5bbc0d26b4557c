//! Storage-backed entry points for the per-employee benefit figures.
//!
//! Each function performs the range read the calculator expects (filtered,
//! ordered) and hands the result to the pure calculation in
//! [`mileage`](crate::libs::mileage), [`timesheet`](crate::libs::timesheet) or
//! [`savings`](crate::libs::savings).

use crate::libs::{
    employee::payroll_rate,
    error::Result,
    mileage::{self, Mileage},
    savings::{self, TimeSavings},
    storage::Storage,
    task::TaskFilter,
    timesheet::{self, Timesheet},
    window::DateWindow,
};
use tracing::debug;

pub async fn mileage(storage: &dyn Storage, employee_id: i64, window: DateWindow) -> Result<Mileage> {
    let fixes = storage.employee_locations(employee_id, window).await?;
    debug!(employee_id, fixes = fixes.len(), "aggregating mileage");
    Ok(mileage::aggregate(&fixes, employee_id, window))
}

pub async fn timesheet(storage: &dyn Storage, employee_id: i64, window: DateWindow) -> Result<Timesheet> {
    let (tasks, employee) = tokio::try_join!(
        storage.completed_tasks_in_window(employee_id, window),
        storage.employee(employee_id)
    )?;
    let rate = payroll_rate(employee.as_ref());
    debug!(employee_id, tasks = tasks.len(), rate, "calculating timesheet");
    Ok(timesheet::calculate(&tasks, rate, window))
}

/// Savings across every completed task of the employee, regardless of date.
pub async fn time_savings(storage: &dyn Storage, employee_id: i64) -> Result<TimeSavings> {
    let tasks = storage.tasks(TaskFilter::CompletedForEmployee(employee_id)).await?;
    Ok(savings::estimate(&tasks))
}
