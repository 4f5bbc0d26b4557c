//! Date windows used to scope reads and deletes.
//!
//! A window is an inclusive `[start, end]` range of local timestamps. Two ways
//! of building one exist:
//!
//! - [`DateWindow::parse`] keeps both bounds exactly as given. Mileage and
//!   timesheet lookups use it.
//! - [`DateWindow::parse_week`] lifts the end bound to the last millisecond of
//!   its day (`23:59:59.999`) while leaving the start bound untouched. Weekly
//!   reports and cleanups use it, so `2024-01-01`..`2024-01-07` covers the
//!   whole of the seventh.
//!
//! The start bound is never floored to midnight. A start given with a time of
//! day excludes the earlier part of that day.

use crate::libs::error::{Error, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use serde::Serialize;
use std::fmt;

/// Text format every timestamp is stored and compared in.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// A start after the end is kept as given; it simply matches nothing.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Builds a window from raw bounds without any normalisation.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = parse_bound("start", start)?;
        let end = parse_bound("end", end)?;
        Ok(Self::new(start, end))
    }

    /// Builds a report/cleanup window: the end bound is lifted to
    /// `23:59:59.999` of its day.
    pub fn parse_week(week_start: Option<&str>, week_end: Option<&str>) -> Result<Self> {
        let start = parse_bound("week_start", week_start)?;
        let end = end_of_day(parse_bound("week_end", week_end)?.date());
        Ok(Self::new(start, end))
    }

    /// `Week-WW-YYYY`, ISO week of the start bound and its calendar year.
    pub fn week_label(&self) -> String {
        format!("Week-{}", self.start.format("%V-%Y"))
    }

    pub fn start_str(&self) -> String {
        format_timestamp(&self.start)
    }

    pub fn end_str(&self) -> String {
        format_timestamp(&self.end)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start.format(DATE_FORMAT), self.end.format(DATE_FORMAT))
    }
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 is always a valid time
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}

/// Local wall-clock time at the millisecond precision timestamps are stored with.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(3)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim().trim_end_matches('Z');
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| Error::Validation(format!("Invalid date: '{}'", value)))
}

/// Serde adapter for optional timestamps in request payloads. Accepts every
/// form [`parse_timestamp`] does, including a trailing `Z`.
pub fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_timestamp(v).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn parse_bound(name: &str, value: Option<&str>) -> Result<NaiveDateTime> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_timestamp(v).map_err(|_| Error::Validation(format!("Invalid {} date: '{}'", name, v))),
        None => Err(Error::Validation(format!("Missing required {} date", name))),
    }
}
