use super::open_database;
use crate::{
    libs::{benefits, messages::Message, savings::TimeSavingsView, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SavingsArgs {
    #[arg(help = "Employee id")]
    employee_id: i64,
}

pub async fn cmd(args: SavingsArgs) -> Result<()> {
    let (_, db) = open_database()?;
    let savings = benefits::time_savings(&db, args.employee_id).await?;

    msg_print!(Message::SavingsHeader(args.employee_id), true);
    View::savings(&TimeSavingsView::from(&savings))?;
    Ok(())
}
