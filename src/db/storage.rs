//! SQLite implementation of the [`Storage`] contract.
//!
//! Every call runs its query on the blocking pool so async callers never
//! stall the runtime on disk I/O. Independent calls issued together (the
//! report reads, the cleanup deletes) queue on the connection mutex.

use super::{
    db::Db,
    emergencies::Emergencies,
    employees::Employees,
    locations::Locations,
    logs::Logs,
    tasks::Tasks,
};
use crate::libs::{
    activity::{ActivityLog, LogQuery, NewActivity},
    emergency::{Emergency, NewEmergency},
    employee::{Employee, NewEmployee},
    error::Result,
    location::{LocationFix, NewLocation},
    storage::Storage,
    task::{NewTask, Task, TaskFilter, TaskStatus},
    window::DateWindow,
};
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::Arc;

impl Db {
    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let value = tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            f(&guard)
        })
        .await??;
        Ok(value)
    }
}

#[async_trait]
impl Storage for Db {
    async fn insert_employee(&self, employee: NewEmployee) -> Result<Employee> {
        self.run(move |conn| Employees::new(conn).insert(&employee)).await
    }

    async fn employee(&self, id: i64) -> Result<Option<Employee>> {
        self.run(move |conn| Employees::new(conn).get(id)).await
    }

    async fn active_employees(&self) -> Result<Vec<Employee>> {
        self.run(|conn| Employees::new(conn).fetch_active()).await
    }

    async fn insert_task(&self, task: NewTask) -> Result<Task> {
        self.run(move |conn| Tasks::new(conn).insert(&task)).await
    }

    async fn task(&self, id: i64) -> Result<Option<Task>> {
        self.run(move |conn| Tasks::new(conn).get(id)).await
    }

    async fn tasks(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        self.run(move |conn| Tasks::new(conn).fetch(filter)).await
    }

    async fn tasks_in_window(&self, window: DateWindow) -> Result<Vec<Task>> {
        self.run(move |conn| Tasks::new(conn).fetch_in_window(&window)).await
    }

    async fn completed_tasks_in_window(&self, employee_id: i64, window: DateWindow) -> Result<Vec<Task>> {
        self.run(move |conn| Tasks::new(conn).fetch_completed_in_window(employee_id, &window)).await
    }

    async fn update_task_progress(&self, task_id: i64, status: TaskStatus, actual_hours: f64) -> Result<bool> {
        self.run(move |conn| Tasks::new(conn).update_progress(task_id, status, actual_hours)).await
    }

    async fn delete_completed_tasks(&self, window: DateWindow) -> Result<usize> {
        self.run(move |conn| Tasks::new(conn).delete_completed(&window)).await
    }

    async fn insert_location(&self, location: NewLocation) -> Result<LocationFix> {
        self.run(move |conn| Locations::new(conn).insert(&location)).await
    }

    async fn employee_locations(&self, employee_id: i64, window: DateWindow) -> Result<Vec<LocationFix>> {
        self.run(move |conn| Locations::new(conn).fetch_for_employee(employee_id, &window)).await
    }

    async fn recent_locations(&self, employee_id: i64, limit: usize) -> Result<Vec<LocationFix>> {
        self.run(move |conn| Locations::new(conn).fetch_recent(employee_id, limit)).await
    }

    async fn locations_in_window(&self, window: DateWindow) -> Result<Vec<LocationFix>> {
        self.run(move |conn| Locations::new(conn).fetch_in_window(&window)).await
    }

    async fn delete_locations(&self, window: DateWindow) -> Result<usize> {
        self.run(move |conn| Locations::new(conn).delete_in_window(&window)).await
    }

    async fn insert_log(&self, entry: NewActivity) -> Result<ActivityLog> {
        self.run(move |conn| Logs::new(conn).insert(&entry)).await
    }

    async fn logs_in_window(&self, window: DateWindow) -> Result<Vec<ActivityLog>> {
        self.run(move |conn| Logs::new(conn).fetch_in_window(&window)).await
    }

    async fn logs(&self, query: LogQuery) -> Result<(Vec<ActivityLog>, usize)> {
        self.run(move |conn| Logs::new(conn).fetch_page(&query)).await
    }

    async fn delete_logs(&self, window: DateWindow) -> Result<usize> {
        self.run(move |conn| Logs::new(conn).delete_in_window(&window)).await
    }

    async fn insert_emergency(&self, emergency: NewEmergency) -> Result<Emergency> {
        self.run(move |conn| Emergencies::new(conn).insert(&emergency)).await
    }

    async fn emergencies_in_window(&self, window: DateWindow) -> Result<Vec<Emergency>> {
        self.run(move |conn| Emergencies::new(conn).fetch_in_window(&window)).await
    }
}
