use super::open_database;
use crate::{
    libs::{
        audit::{self, Auditor, RequestMeta},
        backup,
        export::{ExportFormat, Exporter},
        messages::Message,
        report::WeeklyReportBuilder,
        view::View,
    },
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(long, help = "First day of the week (YYYY-MM-DD)")]
    week_start: String,
    #[arg(long, help = "Last day of the week, included up to 23:59:59.999")]
    week_end: String,
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,
    #[arg(short, long, help = "Output directory, defaults to the configured export directory")]
    output: Option<PathBuf>,
    #[arg(long, help = "Also pack the CSV files into a tar.gz backup")]
    archive: bool,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let (config, db) = open_database()?;
    let report = WeeklyReportBuilder::new(&db)
        .build(Some(&args.week_start), Some(&args.week_end))
        .await?;

    msg_print!(Message::ReportHeader(report.summary.week_number.clone()), true);
    View::summary(&report.summary)?;

    let output_dir = match args.output {
        Some(dir) => dir,
        None => config.export_dir()?,
    };
    let written = Exporter::new(args.format, output_dir.clone()).export(&report)?;
    for path in &written {
        msg_success!(Message::ReportExported(path.display().to_string()));
    }

    if args.archive {
        let archive = backup::write_archive(&output_dir, &report)?;
        msg_success!(Message::ArchiveCreated(archive.display().to_string()));
    }

    Auditor::new(&db, RequestMeta::default())
        .record(audit::report_generated(&report.summary.week_number, &output_dir.display().to_string()))
        .await;

    Ok(())
}
