use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Hourly rate applied when an employee has none on record.
pub const DEFAULT_HOURLY_RATE: f64 = 25.0;

pub const DEFAULT_ROLE: &str = "employee";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub hourly_rate: f64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewEmployee {
    pub fn new(name: &str, email: &str) -> Self {
        NewEmployee {
            name: name.to_string(),
            email: email.to_string(),
            role: None,
            hourly_rate: None,
            is_active: None,
        }
    }

    pub fn with_rate(mut self, hourly_rate: f64) -> Self {
        self.hourly_rate = Some(hourly_rate);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = Some(false);
        self
    }
}

/// Rate used for payroll: the employee's own, or the default when the
/// employee is unknown or carries a zero rate.
pub fn payroll_rate(employee: Option<&Employee>) -> f64 {
    match employee.map(|e| e.hourly_rate) {
        Some(rate) if rate != 0.0 => rate,
        _ => DEFAULT_HOURLY_RATE,
    }
}
