use crate::libs::task::{NewTask, Task, TaskFilter, TaskStatus};
use crate::libs::window::{self, format_timestamp, DateWindow};
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension, Result, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (employee_id, title, description, customer_name, customer_phone, address, priority, due_date, status, estimated_hours, actual_hours, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const SELECT_TASKS: &str = "SELECT id, employee_id, title, description, customer_name, customer_phone, address, priority, due_date, status, estimated_hours, actual_hours, created_at FROM tasks";
const ORDER_BY_URGENCY: &str = "ORDER BY priority DESC, due_date ASC, id ASC";
const WHERE_CREATED_BETWEEN: &str = "created_at >= ? AND created_at <= ?";
const UPDATE_PROGRESS: &str = "UPDATE tasks SET status = ?1, actual_hours = ?2 WHERE id = ?3";
const DELETE_COMPLETED: &str = "DELETE FROM tasks WHERE status = 'completed' AND created_at >= ?1 AND created_at <= ?2";

pub struct Tasks<'c> {
    conn: &'c Connection,
}

impl<'c> Tasks<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Tasks { conn }
    }

    pub fn insert(&self, task: &NewTask) -> Result<Task> {
        let created_at = task.created_at.unwrap_or_else(window::now);
        let priority = task.priority.unwrap_or(1);
        let status = task.status.unwrap_or_default();

        self.conn.execute(
            INSERT_TASK,
            params![
                task.employee_id,
                task.title,
                task.description,
                task.customer_name,
                task.customer_phone,
                task.address,
                priority,
                task.due_date.as_ref().map(format_timestamp),
                status.as_str(),
                task.estimated_hours,
                task.actual_hours,
                format_timestamp(&created_at),
            ],
        )?;

        Ok(Task {
            id: self.conn.last_insert_rowid(),
            employee_id: task.employee_id,
            title: task.title.clone(),
            description: task.description.clone(),
            customer_name: task.customer_name.clone(),
            customer_phone: task.customer_phone.clone(),
            address: task.address.clone(),
            priority,
            due_date: task.due_date,
            status,
            estimated_hours: task.estimated_hours,
            actual_hours: task.actual_hours,
            created_at,
        })
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_TASKS), params![id], Self::map_row)
            .optional()
    }

    pub fn fetch(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let (clause, params): (&str, Vec<Value>) = match filter {
            TaskFilter::ByEmployee(id) => ("WHERE employee_id = ?", vec![id.into()]),
            TaskFilter::PendingForEmployee(id) => ("WHERE employee_id = ? AND status = 'pending'", vec![id.into()]),
            TaskFilter::CompletedForEmployee(id) => ("WHERE employee_id = ? AND status = 'completed'", vec![id.into()]),
        };
        self.query(&format!("{} {} {}", SELECT_TASKS, clause, ORDER_BY_URGENCY), params)
    }

    pub fn fetch_in_window(&self, window: &DateWindow) -> Result<Vec<Task>> {
        self.query(
            &format!("{} WHERE {} ORDER BY created_at, id", SELECT_TASKS, WHERE_CREATED_BETWEEN),
            vec![window.start_str().into(), window.end_str().into()],
        )
    }

    pub fn fetch_completed_in_window(&self, employee_id: i64, window: &DateWindow) -> Result<Vec<Task>> {
        self.query(
            &format!(
                "{} WHERE employee_id = ? AND status = 'completed' AND {} ORDER BY created_at, id",
                SELECT_TASKS, WHERE_CREATED_BETWEEN
            ),
            vec![employee_id.into(), window.start_str().into(), window.end_str().into()],
        )
    }

    /// Returns `false` when no row matched `task_id`.
    pub fn update_progress(&self, task_id: i64, status: TaskStatus, actual_hours: f64) -> Result<bool> {
        let changed = self.conn.execute(UPDATE_PROGRESS, params![status.as_str(), actual_hours, task_id])?;
        Ok(changed > 0)
    }

    pub fn delete_completed(&self, window: &DateWindow) -> Result<usize> {
        self.conn.execute(DELETE_COMPLETED, params![window.start_str(), window.end_str()])
    }

    fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let tasks = stmt.query_map(params_from_iter(params), Self::map_row)?.collect::<Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn map_row(row: &Row) -> Result<Task> {
        let status: String = row.get(9)?;
        Ok(Task {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            customer_name: row.get(4)?,
            customer_phone: row.get(5)?,
            address: row.get(6)?,
            priority: row.get(7)?,
            due_date: row.get(8)?,
            status: status
                .parse()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e)))?,
            estimated_hours: row.get(10)?,
            actual_hours: row.get(11)?,
            created_at: row.get(12)?,
        })
    }
}
