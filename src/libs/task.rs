use crate::libs::{error::Error, window::deserialize_optional_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(Error::Validation(format!("Unknown task status: '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub address: Option<String>,
    /// 1 = low, 2 = medium, 3 = high.
    pub priority: i64,
    pub due_date: Option<NaiveDateTime>,
    pub status: TaskStatus,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Hours actually worked; absent counts as none.
    pub fn worked_hours(&self) -> f64 {
        self.actual_hours.unwrap_or(0.0)
    }

    /// Planned hours; an absent or zero estimate counts as one hour.
    pub fn planned_hours(&self) -> f64 {
        match self.estimated_hours {
            Some(h) if h != 0.0 => h,
            _ => 1.0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Payload for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub employee_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    /// Defaults to the time of insertion.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl NewTask {
    pub fn new(title: &str) -> Self {
        NewTask {
            title: title.to_string(),
            ..Default::default()
        }
    }
}

/// Progress report for a task: the new status and the hours spent on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskProgress {
    pub task_id: i64,
    #[serde(default)]
    pub employee_id: Option<i64>,
    pub action: TaskStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    ByEmployee(i64),
    PendingForEmployee(i64),
    CompletedForEmployee(i64),
}
