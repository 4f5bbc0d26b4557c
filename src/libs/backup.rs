//! Compressed backup of a weekly report.
//!
//! Packs the CSV file of every collection into a single
//! `fieldforce_backup_<week>.tar.gz` so the window can be purged afterwards.

use crate::libs::report::WeeklyReport;
use anyhow::Result;
use flate2::{write::GzEncoder, Compression};
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::{Builder, Header};

pub fn archive_path(dir: &Path, report: &WeeklyReport) -> PathBuf {
    dir.join(format!("fieldforce_backup_{}.tar.gz", report.summary.week_number))
}

/// Writes the archive into `dir` and returns its path.
pub fn write_archive(dir: &Path, report: &WeeklyReport) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = archive_path(dir, report);

    let encoder = GzEncoder::new(File::create(&path)?, Compression::default());
    let mut archive = Builder::new(encoder);

    let mtime = report.summary.generated_at.and_utc().timestamp().max(0) as u64;
    for (name, csv) in &report.files {
        let mut header = Header::new_gnu();
        header.set_size(csv.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(mtime);
        header.set_cksum();
        archive.append_data(&mut header, format!("{}.csv", name), csv.as_bytes())?;
    }

    archive.into_inner()?.finish()?;
    Ok(path)
}
