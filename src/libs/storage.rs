//! The document-store contract the benefits and report pipeline depends on.
//!
//! Every collection (employees, tasks, locations, logs, emergencies) is
//! reachable through one [`Storage`] handle that the process entry point opens
//! and threads through each operation. Range reads take an inclusive
//! [`DateWindow`]. Location reads are always ordered by ascending timestamp.
//!
//! The SQLite implementation lives in [`crate::db::storage`].

use crate::libs::{
    activity::{ActivityLog, LogQuery, NewActivity},
    emergency::{Emergency, NewEmergency},
    employee::{Employee, NewEmployee},
    error::Result,
    location::{LocationFix, NewLocation},
    task::{NewTask, Task, TaskFilter, TaskStatus},
    window::DateWindow,
};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_employee(&self, employee: NewEmployee) -> Result<Employee>;
    async fn employee(&self, id: i64) -> Result<Option<Employee>>;
    async fn active_employees(&self) -> Result<Vec<Employee>>;

    async fn insert_task(&self, task: NewTask) -> Result<Task>;
    async fn task(&self, id: i64) -> Result<Option<Task>>;
    async fn tasks(&self, filter: TaskFilter) -> Result<Vec<Task>>;
    /// Tasks created inside the window, any employee, any status.
    async fn tasks_in_window(&self, window: DateWindow) -> Result<Vec<Task>>;
    /// Completed tasks of one employee created inside the window.
    async fn completed_tasks_in_window(&self, employee_id: i64, window: DateWindow) -> Result<Vec<Task>>;
    /// Returns `false` when no task has that id.
    async fn update_task_progress(&self, task_id: i64, status: TaskStatus, actual_hours: f64) -> Result<bool>;
    async fn delete_completed_tasks(&self, window: DateWindow) -> Result<usize>;

    async fn insert_location(&self, location: NewLocation) -> Result<LocationFix>;
    /// One employee's fixes inside the window, oldest first.
    async fn employee_locations(&self, employee_id: i64, window: DateWindow) -> Result<Vec<LocationFix>>;
    /// Latest fixes of one employee, newest first.
    async fn recent_locations(&self, employee_id: i64, limit: usize) -> Result<Vec<LocationFix>>;
    /// Fixes of every employee inside the window, oldest first.
    async fn locations_in_window(&self, window: DateWindow) -> Result<Vec<LocationFix>>;
    async fn delete_locations(&self, window: DateWindow) -> Result<usize>;

    async fn insert_log(&self, entry: NewActivity) -> Result<ActivityLog>;
    async fn logs_in_window(&self, window: DateWindow) -> Result<Vec<ActivityLog>>;
    /// One page of logs, newest first, plus the unpaged total.
    async fn logs(&self, query: LogQuery) -> Result<(Vec<ActivityLog>, usize)>;
    async fn delete_logs(&self, window: DateWindow) -> Result<usize>;

    async fn insert_emergency(&self, emergency: NewEmergency) -> Result<Emergency>;
    async fn emergencies_in_window(&self, window: DateWindow) -> Result<Vec<Emergency>>;
}

pub type SharedStorage = Arc<dyn Storage>;
