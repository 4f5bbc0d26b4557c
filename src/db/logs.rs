use crate::libs::activity::{ActionType, ActivityLog, LogQuery, NewActivity};
use crate::libs::geo::Coordinates;
use crate::libs::window::{self, format_timestamp, DateWindow};
use rusqlite::{params, params_from_iter, types::Value, Connection, Result, Row};

const INSERT_LOG: &str = "INSERT INTO logs (employee_id, employee_name, action_type, description, task_id, task_title, lat, lng, timestamp, ip_address, device_info, details)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const SELECT_LOGS: &str = "SELECT id, employee_id, employee_name, action_type, description, task_id, task_title, lat, lng, timestamp, ip_address, device_info, details FROM logs";
const UNKNOWN_EMPLOYEE: &str = "Unknown";
const DELETE_IN_WINDOW: &str = "DELETE FROM logs WHERE timestamp >= ?1 AND timestamp <= ?2";

pub struct Logs<'c> {
    conn: &'c Connection,
}

impl<'c> Logs<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Logs { conn }
    }

    pub fn insert(&self, entry: &NewActivity) -> Result<ActivityLog> {
        let timestamp = entry.timestamp.unwrap_or_else(window::now);
        let details = entry.details.as_ref().map(|d| d.to_string());
        let employee_name = entry.employee_name.clone().unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string());

        self.conn.execute(
            INSERT_LOG,
            params![
                entry.employee_id,
                employee_name,
                entry.action_type.as_str(),
                entry.description,
                entry.task_id,
                entry.task_title,
                entry.location.map(|l| l.lat),
                entry.location.map(|l| l.lng),
                format_timestamp(&timestamp),
                entry.ip_address,
                entry.device_info,
                details,
            ],
        )?;

        Ok(ActivityLog {
            id: self.conn.last_insert_rowid(),
            employee_id: entry.employee_id,
            employee_name,
            action_type: entry.action_type,
            description: entry.description.clone(),
            task_id: entry.task_id,
            task_title: entry.task_title.clone(),
            location: entry.location,
            timestamp,
            ip_address: entry.ip_address.clone(),
            device_info: entry.device_info.clone(),
            details: entry.details.clone(),
        })
    }

    pub fn fetch_in_window(&self, window: &DateWindow) -> Result<Vec<ActivityLog>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE timestamp >= ?1 AND timestamp <= ?2 ORDER BY timestamp ASC, id ASC", SELECT_LOGS))?;
        let logs = stmt
            .query_map(params![window.start_str(), window.end_str()], Self::map_row)?
            .collect::<Result<Vec<_>>>()?;
        Ok(logs)
    }

    /// One page of logs, newest first, together with the unpaged match count.
    pub fn fetch_page(&self, query: &LogQuery) -> Result<(Vec<ActivityLog>, usize)> {
        let mut conditions = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(employee_id) = query.employee_id {
            conditions.push("employee_id = ?");
            values.push(employee_id.into());
        }
        if let Some(action_type) = &query.action_type {
            conditions.push("action_type = ?");
            values.push(action_type.clone().into());
        }
        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM logs {}", clause),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;

        let limit = query.limit.max(1);
        let offset = query.page.saturating_sub(1).saturating_mul(limit);
        values.push(i64::try_from(limit).unwrap_or(i64::MAX).into());
        values.push(i64::try_from(offset).unwrap_or(i64::MAX).into());

        let mut stmt = self
            .conn
            .prepare(&format!("{} {} ORDER BY timestamp DESC, id DESC LIMIT ? OFFSET ?", SELECT_LOGS, clause))?;
        let logs = stmt.query_map(params_from_iter(values), Self::map_row)?.collect::<Result<Vec<_>>>()?;

        Ok((logs, total as usize))
    }

    pub fn delete_in_window(&self, window: &DateWindow) -> Result<usize> {
        self.conn.execute(DELETE_IN_WINDOW, params![window.start_str(), window.end_str()])
    }

    fn map_row(row: &Row) -> Result<ActivityLog> {
        let action_type: String = row.get(3)?;
        let lat: Option<f64> = row.get(7)?;
        let lng: Option<f64> = row.get(8)?;
        let details: Option<String> = row.get(12)?;
        Ok(ActivityLog {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            employee_name: row.get(2)?,
            action_type: ActionType::parse(&action_type),
            description: row.get(4)?,
            task_id: row.get(5)?,
            task_title: row.get(6)?,
            location: lat.zip(lng).map(|(lat, lng)| Coordinates::new(lat, lng)),
            timestamp: row.get(9)?,
            ip_address: row.get(10)?,
            device_info: row.get(11)?,
            details: details.and_then(|d| serde_json::from_str(&d).ok()),
        })
    }
}
