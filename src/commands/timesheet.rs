use super::open_database;
use crate::{
    libs::{benefits, messages::Message, timesheet::TimesheetView, view::View, window::DateWindow},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TimesheetArgs {
    #[arg(help = "Employee id")]
    employee_id: i64,
    #[arg(long)]
    start: String,
    #[arg(long)]
    end: String,
}

pub async fn cmd(args: TimesheetArgs) -> Result<()> {
    let window = DateWindow::parse(Some(&args.start), Some(&args.end))?;
    let (_, db) = open_database()?;

    let timesheet = benefits::timesheet(&db, args.employee_id, window).await?;
    let view = TimesheetView::from(&timesheet);

    msg_print!(Message::TimesheetHeader(args.employee_id, view.period.clone()), true);
    View::timesheet(&view)?;
    Ok(())
}
