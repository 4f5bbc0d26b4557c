//! Payroll derived from completed tasks.
//!
//! Hours come from the `actual_hours` of completed tasks created inside the
//! window; the caller does the filtering. The first [`REGULAR_HOURS_CAP`] hours
//! are paid at the hourly rate and everything beyond at [`OVERTIME_MULTIPLIER`]
//! times that rate. Nothing here is stored: the figures are recomputed on every
//! request.

use crate::libs::{
    formatter::{format_currency, format_hours},
    task::Task,
    window::DateWindow,
};
use serde::Serialize;

/// Hours per window paid at the regular rate.
pub const REGULAR_HOURS_CAP: f64 = 40.0;

pub const OVERTIME_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Timesheet {
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime: f64,
    pub regular_pay: f64,
    pub overtime_pay: f64,
    pub total_pay: f64,
    pub hourly_rate: f64,
    pub window: DateWindow,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetView {
    pub total_hours: String,
    pub regular_hours: String,
    pub overtime: String,
    pub regular_pay: String,
    pub overtime_pay: String,
    pub total_pay: String,
    pub period: String,
}

pub fn calculate(completed: &[Task], hourly_rate: f64, window: DateWindow) -> Timesheet {
    let total_hours: f64 = completed.iter().map(Task::worked_hours).sum();
    let regular_hours = total_hours.min(REGULAR_HOURS_CAP);
    let overtime = (total_hours - REGULAR_HOURS_CAP).max(0.0);

    let regular_pay = regular_hours * hourly_rate;
    let overtime_pay = overtime * hourly_rate * OVERTIME_MULTIPLIER;

    Timesheet {
        total_hours,
        regular_hours,
        overtime,
        regular_pay,
        overtime_pay,
        total_pay: regular_pay + overtime_pay,
        hourly_rate,
        window,
    }
}

impl From<&Timesheet> for TimesheetView {
    fn from(t: &Timesheet) -> Self {
        TimesheetView {
            total_hours: format_hours(t.total_hours),
            regular_hours: format_hours(t.regular_hours),
            overtime: format_hours(t.overtime),
            regular_pay: format_currency(t.regular_pay),
            overtime_pay: format_currency(t.overtime_pay),
            total_pay: format_currency(t.total_pay),
            period: t.window.to_string(),
        }
    }
}
