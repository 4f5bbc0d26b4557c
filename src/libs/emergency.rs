use crate::libs::{geo::Coordinates, window::deserialize_optional_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const STATUS_ACTIVE: &str = "active";

/// An alert raised by an employee in the field. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emergency {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub emergency_type: String,
    pub location: Option<Coordinates>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmergency {
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub emergency_type: String,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Someone to call, served to the client as a static list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub role: String,
}

impl EmergencyContact {
    fn new(name: &str, phone: &str, role: &str) -> Self {
        EmergencyContact {
            name: name.to_string(),
            phone: phone.to_string(),
            role: role.to_string(),
        }
    }

    pub fn defaults() -> Vec<EmergencyContact> {
        vec![
            EmergencyContact::new("Safety Manager", "+1234567890", "Primary Safety Contact"),
            EmergencyContact::new("Medical Emergency", "911", "Emergency Services"),
            EmergencyContact::new("Team Lead", "+1234567891", "Immediate Supervisor"),
            EmergencyContact::new("HR Department", "+1234567892", "Human Resources"),
        ]
    }
}
