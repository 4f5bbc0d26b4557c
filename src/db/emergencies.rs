use crate::libs::emergency::{Emergency, NewEmergency, STATUS_ACTIVE};
use crate::libs::geo::Coordinates;
use crate::libs::window::{self, format_timestamp, DateWindow};
use rusqlite::{params, Connection, Result, Row};

const INSERT_EMERGENCY: &str = "INSERT INTO emergencies (employee_id, employee_name, emergency_type, lat, lng, message, status, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_EMERGENCIES: &str = "SELECT id, employee_id, employee_name, emergency_type, lat, lng, message, status, created_at FROM emergencies";

pub struct Emergencies<'c> {
    conn: &'c Connection,
}

impl<'c> Emergencies<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Emergencies { conn }
    }

    pub fn insert(&self, emergency: &NewEmergency) -> Result<Emergency> {
        let created_at = emergency.created_at.unwrap_or_else(window::now);
        self.conn.execute(
            INSERT_EMERGENCY,
            params![
                emergency.employee_id,
                emergency.employee_name,
                emergency.emergency_type,
                emergency.location.map(|l| l.lat),
                emergency.location.map(|l| l.lng),
                emergency.message,
                STATUS_ACTIVE,
                format_timestamp(&created_at),
            ],
        )?;

        Ok(Emergency {
            id: self.conn.last_insert_rowid(),
            employee_id: emergency.employee_id,
            employee_name: emergency.employee_name.clone(),
            emergency_type: emergency.emergency_type.clone(),
            location: emergency.location,
            message: emergency.message.clone(),
            status: STATUS_ACTIVE.to_string(),
            created_at,
        })
    }

    pub fn fetch_in_window(&self, window: &DateWindow) -> Result<Vec<Emergency>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE created_at >= ?1 AND created_at <= ?2 ORDER BY created_at ASC, id ASC",
            SELECT_EMERGENCIES
        ))?;
        let emergencies = stmt
            .query_map(params![window.start_str(), window.end_str()], Self::map_row)?
            .collect::<Result<Vec<_>>>()?;
        Ok(emergencies)
    }

    fn map_row(row: &Row) -> Result<Emergency> {
        let lat: Option<f64> = row.get(4)?;
        let lng: Option<f64> = row.get(5)?;
        Ok(Emergency {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            employee_name: row.get(2)?,
            emergency_type: row.get(3)?,
            location: lat.zip(lng).map(|(lat, lng)| Coordinates::new(lat, lng)),
            message: row.get(6)?,
            status: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}
