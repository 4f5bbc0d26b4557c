//! Exchange-format rendering and on-disk export of weekly reports.
//!
//! Every collection is projected onto a fixed, ordered list of fields and
//! rendered as CSV: one header row with the field names, then one row per
//! record. An empty collection renders as the header row alone, so
//! `rows - 1` is always the number of records.
//!
//! ## Features
//!
//! - **Fixed projections**: each record type declares its columns once
//! - **In-memory CSV**: used by the weekly report response
//! - **Disk export**: CSV files, one JSON document, or an Excel workbook
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fieldforce::libs::export::{ExportFormat, Exporter};
//! use std::path::PathBuf;
//!
//! # fn demo(report: &fieldforce::libs::report::WeeklyReport) -> anyhow::Result<()> {
//! let exporter = Exporter::new(ExportFormat::Csv, PathBuf::from("exports"));
//! let written = exporter.export(report)?;
//! # Ok(())
//! # }
//! ```

use crate::libs::{
    activity::ActivityLog,
    emergency::Emergency,
    employee::Employee,
    error::{Error, Result},
    formatter::format_export_timestamp,
    location::LocationFix,
    report::{WeeklyReport, WeeklySummary},
    task::Task,
};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The collections a weekly report carries, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Tasks,
    Locations,
    Logs,
    Employees,
    Emergencies,
    Summary,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Tasks,
        Collection::Locations,
        Collection::Logs,
        Collection::Employees,
        Collection::Emergencies,
        Collection::Summary,
    ];

    /// Key used in the response `files` map and as the file stem on disk.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Tasks => "tasks",
            Collection::Locations => "locations",
            Collection::Logs => "logs",
            Collection::Employees => "employees",
            Collection::Emergencies => "emergencies",
            Collection::Summary => "summary",
        }
    }

    /// Column projection, in order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Tasks => &[
                "id",
                "title",
                "customer_name",
                "customer_phone",
                "address",
                "priority",
                "due_date",
                "status",
                "estimated_hours",
                "actual_hours",
                "created_at",
            ],
            Collection::Locations => &["id", "employee_id", "latitude", "longitude", "timestamp"],
            Collection::Logs => &["id", "employee_name", "action_type", "description", "timestamp", "ip_address"],
            Collection::Employees => &["id", "name", "email", "role", "hourlyRate", "createdAt"],
            Collection::Emergencies => &["id", "employee_name", "emergency_type", "message", "status", "created_at"],
            Collection::Summary => &[
                "week_number",
                "total_employees",
                "total_tasks",
                "completed_tasks",
                "total_locations",
                "total_logs",
                "emergencies",
                "total_mileage",
            ],
        }
    }
}

/// A record that can be flattened into one row of its collection.
pub trait ExportRecord {
    const COLLECTION: Collection;

    /// Cell values in the order of [`Collection::fields`].
    fn row(&self) -> Vec<String>;
}

/// A rendered collection: header plus string cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTable {
    pub collection: Collection,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn from_records<R: ExportRecord>(records: &[R]) -> Self {
        ExportTable {
            collection: R::COLLECTION,
            rows: records.iter().map(ExportRecord::row).collect(),
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.collection.fields()
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(self.fields()).map_err(|e| Error::Serialization(e.to_string()))?;
        for row in &self.rows {
            wtr.write_record(row).map_err(|e| Error::Serialization(e.to_string()))?;
        }
        let bytes = wtr.into_inner().map_err(|e| Error::Serialization(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Serialization(e.to_string()))?;

        // No trailing terminator: an empty collection is exactly one line
        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Renders records straight to CSV text.
pub fn to_csv<R: ExportRecord>(records: &[R]) -> Result<String> {
    ExportTable::from_records(records).to_csv()
}

fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn opt_ts(value: &Option<NaiveDateTime>) -> String {
    value.as_ref().map(format_export_timestamp).unwrap_or_default()
}

impl ExportRecord for Task {
    const COLLECTION: Collection = Collection::Tasks;

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            opt_str(&self.customer_name),
            opt_str(&self.customer_phone),
            opt_str(&self.address),
            self.priority.to_string(),
            opt_ts(&self.due_date),
            self.status.to_string(),
            opt_num(self.estimated_hours),
            opt_num(self.actual_hours),
            format_export_timestamp(&self.created_at),
        ]
    }
}

impl ExportRecord for LocationFix {
    const COLLECTION: Collection = Collection::Locations;

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.employee_id.to_string(),
            self.latitude.to_string(),
            self.longitude.to_string(),
            format_export_timestamp(&self.timestamp),
        ]
    }
}

impl ExportRecord for ActivityLog {
    const COLLECTION: Collection = Collection::Logs;

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.employee_name.clone(),
            self.action_type.to_string(),
            self.description.clone(),
            format_export_timestamp(&self.timestamp),
            opt_str(&self.ip_address),
        ]
    }
}

impl ExportRecord for Employee {
    const COLLECTION: Collection = Collection::Employees;

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
            self.hourly_rate.to_string(),
            format_export_timestamp(&self.created_at),
        ]
    }
}

impl ExportRecord for Emergency {
    const COLLECTION: Collection = Collection::Emergencies;

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt_str(&self.employee_name),
            self.emergency_type.clone(),
            opt_str(&self.message),
            self.status.clone(),
            format_export_timestamp(&self.created_at),
        ]
    }
}

impl ExportRecord for WeeklySummary {
    const COLLECTION: Collection = Collection::Summary;

    fn row(&self) -> Vec<String> {
        vec![
            self.week_number.clone(),
            self.total_employees.to_string(),
            self.total_tasks.to_string(),
            self.completed_tasks.to_string(),
            self.total_locations.to_string(),
            self.total_logs.to_string(),
            self.emergencies.to_string(),
            self.total_mileage.clone(),
        ]
    }
}

/// Output format of a disk export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// One CSV file per collection plus `summary.csv`.
    Csv,
    /// A single pretty-printed JSON document holding the summary and all files.
    Json,
    /// One workbook with a worksheet per collection.
    Excel,
}

/// Writes a [`WeeklyReport`] into a directory.
pub struct Exporter {
    format: ExportFormat,
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_dir: PathBuf) -> Self {
        Self { format, output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the report and returns the paths created.
    pub fn export(&self, report: &WeeklyReport) -> anyhow::Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        match self.format {
            ExportFormat::Csv => self.export_csv(report),
            ExportFormat::Json => self.export_json(report).map(|p| vec![p]),
            ExportFormat::Excel => self.export_excel(report).map(|p| vec![p]),
        }
    }

    fn export_csv(&self, report: &WeeklyReport) -> anyhow::Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (name, csv) in &report.files {
            let path = self.output_dir.join(format!("{}.csv", name));
            fs::write(&path, csv)?;
            written.push(path);
        }
        Ok(written)
    }

    fn export_json(&self, report: &WeeklyReport) -> anyhow::Result<PathBuf> {
        let path = self.output_dir.join(format!("weekly_report_{}.json", report.summary.week_number));
        let file = fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, report)?;
        Ok(path)
    }

    fn export_excel(&self, report: &WeeklyReport) -> anyhow::Result<PathBuf> {
        let path = self.output_dir.join(format!("weekly_report_{}.xlsx", report.summary.week_number));
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        for table in &report.tables {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(table.collection.name())?;

            for (col, field) in table.fields().iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, *field, &header_format)?;
            }
            for (i, row) in table.rows.iter().enumerate() {
                for (col, cell) in row.iter().enumerate() {
                    worksheet.write_string((i + 1) as u32, col as u16, cell)?;
                }
            }
            worksheet.autofit();
        }

        workbook.save(&path)?;
        Ok(path)
    }
}
