//! Estimated versus actual hours on completed tasks.
//!
//! Overruns are not reported: when the work took longer than planned the time
//! saved is clamped to zero. Efficiency is `estimated / actual * 100` and is
//! zero when no actual hours were recorded.

use crate::libs::{formatter::format_hours, task::Task};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSavings {
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub time_saved: f64,
    pub efficiency_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSavingsView {
    pub time_saved: String,
    pub efficiency: String,
    pub message: String,
    pub tip: String,
}

pub fn estimate(completed: &[Task]) -> TimeSavings {
    let estimated_hours: f64 = completed.iter().map(Task::planned_hours).sum();
    let actual_hours: f64 = completed.iter().map(Task::worked_hours).sum();
    from_totals(estimated_hours, actual_hours)
}

/// Same derivation starting from already summed hours.
pub fn from_totals(estimated_hours: f64, actual_hours: f64) -> TimeSavings {
    let efficiency_percent = if actual_hours > 0.0 {
        estimated_hours / actual_hours * 100.0
    } else {
        0.0
    };

    TimeSavings {
        estimated_hours,
        actual_hours,
        time_saved: (estimated_hours - actual_hours).max(0.0),
        efficiency_percent,
    }
}

impl From<&TimeSavings> for TimeSavingsView {
    fn from(s: &TimeSavings) -> Self {
        let efficiency = if s.actual_hours > 0.0 {
            format_hours(s.efficiency_percent)
        } else {
            "0".to_string()
        };
        let message = if s.time_saved > 0.0 {
            format!("You saved {} hours compared to the estimates!", format_hours(s.time_saved))
        } else {
            "Keep tracking for time savings insights!".to_string()
        };

        TimeSavingsView {
            time_saved: format_hours(s.time_saved),
            efficiency,
            message,
            tip: "Finishing under the estimate frees time for more jobs".to_string(),
        }
    }
}
