use crate::libs::{geo::Coordinates, window::deserialize_optional_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single timestamped GPS reading. Never updated after it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub id: i64,
    pub employee_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub battery_level: Option<f64>,
    pub timestamp: NaiveDateTime,
}

impl LocationFix {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Payload of a location report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
    pub employee_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub battery_level: Option<f64>,
    /// Defaults to the time of insertion.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub timestamp: Option<NaiveDateTime>,
}
