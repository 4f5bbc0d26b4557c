//! Number and money formatting for reports and API responses.
//!
//! Derived figures are kept as `f64` internally and only rendered at the edge,
//! so every response and export uses the same rules:
//!
//! - **Currency**: dollar sign, two decimals (`$950.00`)
//! - **Hours**: one decimal (`40.0`)
//! - **Miles**: two decimals (`12.34`)
//! - **Negative zero** is printed as plain zero
//!
//! ## Examples
//!
//! ```rust
//! use fieldforce::libs::formatter::{format_currency, format_hours};
//!
//! assert_eq!(format_currency(950.0), "$950.00");
//! assert_eq!(format_hours(45.0), "45.0");
//! ```

use chrono::NaiveDateTime;

/// Renders `value` with a fixed number of decimals.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    // -0.00 would otherwise leak out of tiny negative rounding errors
    let rendered = format!("{:.*}", decimals, value);
    if rendered.starts_with('-') && rendered[1..].chars().all(|c| c == '0' || c == '.') {
        rendered[1..].to_string()
    } else {
        rendered
    }
}

pub fn format_currency(amount: f64) -> String {
    format!("${}", format_fixed(amount, 2))
}

pub fn format_hours(hours: f64) -> String {
    format_fixed(hours, 1)
}

/// ISO-8601 rendering used in exported rows.
pub fn format_export_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}
