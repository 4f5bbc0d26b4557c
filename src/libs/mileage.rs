//! Mileage reimbursement.
//!
//! Folds a time-ordered run of GPS fixes into a travelled distance and
//! monetises it at a fixed per-mile rate. The fixes must already be filtered to
//! one employee and window and sorted by ascending timestamp; storage queries
//! guarantee that order and nothing here re-sorts.

use crate::libs::{
    formatter::{format_currency, format_fixed},
    geo::{self, Coordinates},
    location::LocationFix,
    window::DateWindow,
};
use serde::Serialize;

/// Reimbursement paid per mile driven.
pub const REIMBURSEMENT_PER_MILE: f64 = 0.67;

#[derive(Debug, Clone, PartialEq)]
pub struct Mileage {
    pub employee_id: i64,
    pub total_miles: f64,
    pub reimbursement: f64,
    pub window: DateWindow,
}

/// Response shape with the figures rendered the way clients display them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageView {
    pub total_miles: String,
    pub reimbursement: String,
    pub period: String,
    pub message: String,
}

/// Distance covered by consecutive fixes, in miles.
pub fn total_miles(fixes: &[LocationFix]) -> f64 {
    let points: Vec<Coordinates> = fixes.iter().map(LocationFix::coordinates).collect();
    geo::path_miles(&points)
}

pub fn aggregate(fixes: &[LocationFix], employee_id: i64, window: DateWindow) -> Mileage {
    let total_miles = total_miles(fixes);
    Mileage {
        employee_id,
        total_miles,
        reimbursement: total_miles * REIMBURSEMENT_PER_MILE,
        window,
    }
}

impl Mileage {
    pub fn total_miles_display(&self) -> String {
        format_fixed(self.total_miles, 2)
    }

    pub fn reimbursement_display(&self) -> String {
        format_currency(self.reimbursement)
    }
}

impl From<&Mileage> for MileageView {
    fn from(m: &Mileage) -> Self {
        let reimbursement = m.reimbursement_display();
        MileageView {
            total_miles: m.total_miles_display(),
            message: format!("You've earned {} in mileage reimbursement!", reimbursement),
            reimbursement,
            period: m.window.to_string(),
        }
    }
}
