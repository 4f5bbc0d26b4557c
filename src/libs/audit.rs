//! Activity log writer.
//!
//! Each mutating operation calls [`Auditor::record`] after it has succeeded.
//! The auditor fills in the employee name and task title from storage when
//! only ids are known, then appends one [`ActivityLog`](crate::libs::activity::ActivityLog).
//! A failed audit write is reported as a warning; the operation it describes
//! has already happened and is not undone.

use crate::libs::{
    activity::{ActionType, NewActivity},
    cleanup::DeletedCounts,
    geo::Coordinates,
    storage::Storage,
    task::TaskStatus,
};
use tracing::warn;

/// Where a request came from, when it came over the network.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub device_info: Option<String>,
}

pub struct Auditor<'a> {
    storage: &'a dyn Storage,
    meta: RequestMeta,
}

impl<'a> Auditor<'a> {
    pub fn new(storage: &'a dyn Storage, meta: RequestMeta) -> Self {
        Self { storage, meta }
    }

    pub async fn record(&self, mut entry: NewActivity) {
        if let Some(employee_id) = entry.employee_id {
            if entry.employee_name.is_none() {
                match self.storage.employee(employee_id).await {
                    Ok(Some(employee)) => entry.employee_name = Some(employee.name),
                    Ok(None) => {}
                    Err(e) => warn!(employee_id, error = %e, "employee lookup for audit failed"),
                }
            }
        }
        if let (Some(task_id), None) = (entry.task_id, &entry.task_title) {
            if let Ok(Some(task)) = self.storage.task(task_id).await {
                entry.task_title = Some(task.title);
            }
        }
        entry.ip_address = entry.ip_address.or_else(|| self.meta.ip_address.clone());
        entry.device_info = entry.device_info.or_else(|| self.meta.device_info.clone().or(Some("Unknown".to_string())));

        let action = entry.action_type;
        if let Err(e) = self.storage.insert_log(entry).await {
            warn!(%action, error = %e, "failed to write activity log");
        }
    }
}

pub fn employee_registered(employee_id: i64, name: &str, details: serde_json::Value) -> NewActivity {
    let mut entry = NewActivity::new(ActionType::EmployeeRegistered, format!("New employee registered: {}", name));
    entry.employee_id = Some(employee_id);
    entry.employee_name = Some(name.to_string());
    entry.details = Some(details);
    entry
}

pub fn task_created(employee_id: Option<i64>, task_id: i64, title: &str, details: serde_json::Value) -> NewActivity {
    let mut entry = NewActivity::new(ActionType::TaskCreated, format!("Task created: {}", title));
    entry.employee_id = employee_id;
    entry.task_id = Some(task_id);
    entry.task_title = Some(title.to_string());
    entry.details = Some(details);
    entry
}

pub fn task_updated(employee_id: Option<i64>, task_id: i64, action: TaskStatus, location: Option<Coordinates>, details: serde_json::Value) -> NewActivity {
    let mut entry = NewActivity::new(ActionType::TaskUpdated, format!("Task {}: {}", action, task_id));
    entry.employee_id = employee_id;
    entry.task_id = Some(task_id);
    entry.location = location;
    entry.details = Some(details);
    entry
}

pub fn location_logged(employee_id: i64, at: Coordinates, details: serde_json::Value) -> NewActivity {
    let mut entry = NewActivity::new(ActionType::LocationLogged, format!("Location updated: {}, {}", at.lat, at.lng));
    entry.employee_id = Some(employee_id);
    entry.location = Some(at);
    entry.details = Some(details);
    entry
}

pub fn emergency_triggered(
    employee_id: Option<i64>,
    employee_name: Option<&str>,
    emergency_type: &str,
    message: Option<&str>,
    location: Option<Coordinates>,
    details: serde_json::Value,
) -> NewActivity {
    let mut entry = NewActivity::new(
        ActionType::EmergencyTriggered,
        format!("EMERGENCY: {} - {}", emergency_type, message.unwrap_or_default()),
    );
    entry.employee_id = employee_id;
    entry.employee_name = employee_name.map(str::to_string);
    entry.location = location;
    entry.details = Some(details);
    entry
}

pub fn report_generated(week_number: &str, destination: &str) -> NewActivity {
    NewActivity::new(ActionType::ReportGenerated, format!("Weekly report {} exported to {}", week_number, destination))
}

pub fn weekly_data_cleaned(week_start: &str, week_end: &str, deleted: &DeletedCounts) -> NewActivity {
    let mut entry = NewActivity::new(
        ActionType::WeeklyDataCleaned,
        format!(
            "Weekly data cleanup {} to {}: {} tasks, {} locations, {} logs removed",
            week_start, week_end, deleted.tasks, deleted.locations, deleted.logs
        ),
    );
    entry.details = serde_json::to_value(deleted).ok();
    entry
}
