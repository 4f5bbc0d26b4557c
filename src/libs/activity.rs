use crate::libs::geo::Coordinates;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a logged action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    EmployeeRegistered,
    TaskCreated,
    TaskUpdated,
    LocationLogged,
    EmergencyTriggered,
    ReportGenerated,
    WeeklyDataCleaned,
    SystemAction,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::EmployeeRegistered => "employee_registered",
            ActionType::TaskCreated => "task_created",
            ActionType::TaskUpdated => "task_updated",
            ActionType::LocationLogged => "location_logged",
            ActionType::EmergencyTriggered => "emergency_triggered",
            ActionType::ReportGenerated => "report_generated",
            ActionType::WeeklyDataCleaned => "weekly_data_cleaned",
            ActionType::SystemAction => "system_action",
        }
    }

    pub fn parse(s: &str) -> ActionType {
        match s {
            "employee_registered" => ActionType::EmployeeRegistered,
            "task_created" => ActionType::TaskCreated,
            "task_updated" => ActionType::TaskUpdated,
            "location_logged" => ActionType::LocationLogged,
            "emergency_triggered" => ActionType::EmergencyTriggered,
            "report_generated" => ActionType::ReportGenerated,
            "weekly_data_cleaned" => ActionType::WeeklyDataCleaned,
            _ => ActionType::SystemAction,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit record. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub employee_name: String,
    pub action_type: ActionType,
    pub description: String,
    pub task_id: Option<i64>,
    pub task_title: Option<String>,
    pub location: Option<Coordinates>,
    pub timestamp: NaiveDateTime,
    pub ip_address: Option<String>,
    pub device_info: Option<String>,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub employee_id: Option<i64>,
    /// Looked up from `employee_id` when absent; stored as "Unknown" if still missing.
    pub employee_name: Option<String>,
    pub action_type: ActionType,
    pub description: String,
    pub task_id: Option<i64>,
    pub task_title: Option<String>,
    pub location: Option<Coordinates>,
    pub timestamp: Option<NaiveDateTime>,
    pub ip_address: Option<String>,
    pub device_info: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl NewActivity {
    pub fn new(action_type: ActionType, description: impl Into<String>) -> Self {
        NewActivity {
            employee_id: None,
            employee_name: None,
            action_type,
            description: description.into(),
            task_id: None,
            task_title: None,
            location: None,
            timestamp: None,
            ip_address: None,
            device_info: None,
            details: None,
        }
    }
}

/// Filter and page selection for the admin log listing.
#[derive(Debug, Clone, Deserialize)]
pub struct LogQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub action_type: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    100
}

impl Default for LogQuery {
    fn default() -> Self {
        LogQuery {
            page: default_page(),
            limit: default_limit(),
            employee_id: None,
            action_type: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    pub logs: Vec<ActivityLog>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total: usize,
}
