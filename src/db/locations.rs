use crate::libs::location::{LocationFix, NewLocation};
use crate::libs::window::{self, format_timestamp, DateWindow};
use rusqlite::{params, Connection, Params, Result, Row};

const INSERT_LOCATION: &str = "INSERT INTO locations (employee_id, latitude, longitude, accuracy, battery_level, timestamp) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_LOCATIONS: &str = "SELECT id, employee_id, latitude, longitude, accuracy, battery_level, timestamp FROM locations";
const DELETE_IN_WINDOW: &str = "DELETE FROM locations WHERE timestamp >= ?1 AND timestamp <= ?2";

pub struct Locations<'c> {
    conn: &'c Connection,
}

impl<'c> Locations<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Locations { conn }
    }

    pub fn insert(&self, location: &NewLocation) -> Result<LocationFix> {
        let timestamp = location.timestamp.unwrap_or_else(window::now);
        self.conn.execute(
            INSERT_LOCATION,
            params![
                location.employee_id,
                location.latitude,
                location.longitude,
                location.accuracy,
                location.battery_level,
                format_timestamp(&timestamp),
            ],
        )?;

        Ok(LocationFix {
            id: self.conn.last_insert_rowid(),
            employee_id: location.employee_id,
            latitude: location.latitude,
            longitude: location.longitude,
            accuracy: location.accuracy,
            battery_level: location.battery_level,
            timestamp,
        })
    }

    /// Fixes of one employee inside the window, oldest first.
    pub fn fetch_for_employee(&self, employee_id: i64, window: &DateWindow) -> Result<Vec<LocationFix>> {
        self.query(
            &format!(
                "{} WHERE employee_id = ?1 AND timestamp >= ?2 AND timestamp <= ?3 ORDER BY timestamp ASC, id ASC",
                SELECT_LOCATIONS
            ),
            params![employee_id, window.start_str(), window.end_str()],
        )
    }

    pub fn fetch_recent(&self, employee_id: i64, limit: usize) -> Result<Vec<LocationFix>> {
        self.query(
            &format!("{} WHERE employee_id = ?1 ORDER BY timestamp DESC, id DESC LIMIT ?2", SELECT_LOCATIONS),
            params![employee_id, limit as i64],
        )
    }

    pub fn fetch_in_window(&self, window: &DateWindow) -> Result<Vec<LocationFix>> {
        self.query(
            &format!("{} WHERE timestamp >= ?1 AND timestamp <= ?2 ORDER BY timestamp ASC, id ASC", SELECT_LOCATIONS),
            params![window.start_str(), window.end_str()],
        )
    }

    pub fn delete_in_window(&self, window: &DateWindow) -> Result<usize> {
        self.conn.execute(DELETE_IN_WINDOW, params![window.start_str(), window.end_str()])
    }

    fn query<P: Params>(&self, sql: &str, params: P) -> Result<Vec<LocationFix>> {
        let mut stmt = self.conn.prepare(sql)?;
        let fixes = stmt.query_map(params, Self::map_row)?.collect::<Result<Vec<_>>>()?;
        Ok(fixes)
    }

    fn map_row(row: &Row) -> Result<LocationFix> {
        Ok(LocationFix {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
            accuracy: row.get(4)?,
            battery_level: row.get(5)?,
            timestamp: row.get(6)?,
        })
    }
}
