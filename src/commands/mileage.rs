use super::open_database;
use crate::{
    libs::{benefits, messages::Message, mileage::MileageView, view::View, window::DateWindow},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MileageArgs {
    #[arg(help = "Employee id")]
    employee_id: i64,
    #[arg(long, help = "Window start (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)")]
    start: String,
    #[arg(long, help = "Window end, taken as given")]
    end: String,
}

pub async fn cmd(args: MileageArgs) -> Result<()> {
    let window = DateWindow::parse(Some(&args.start), Some(&args.end))?;
    let (_, db) = open_database()?;

    let mileage = benefits::mileage(&db, args.employee_id, window).await?;
    let view = MileageView::from(&mileage);

    msg_print!(Message::MileageHeader(args.employee_id, view.period.clone()), true);
    View::mileage(&view)?;
    println!("{}", view.message);
    Ok(())
}
