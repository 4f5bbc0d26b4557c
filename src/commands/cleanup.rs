use super::open_database;
use crate::{
    libs::{
        audit::{self, Auditor, RequestMeta},
        cleanup::CleanupCoordinator,
        messages::Message,
        window::DateWindow,
    },
    msg_error_anyhow, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CleanupArgs {
    #[arg(long)]
    week_start: String,
    #[arg(long)]
    week_end: String,
    #[arg(long, help = "Confirm the weekly report for this window has been exported")]
    backup_confirmed: bool,
}

pub async fn cmd(args: CleanupArgs) -> Result<()> {
    let window = DateWindow::parse_week(Some(&args.week_start), Some(&args.week_end))?;

    let confirmed = if args.backup_confirmed {
        true
    } else {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmCleanup(window.to_string()).to_string())
            .default(false)
            .interact()?
    };

    let (_, db) = open_database()?;
    if !confirmed {
        msg_warning!(Message::CleanupCancelled);
    }
    let deleted = CleanupCoordinator::new(&db)
        .cleanup_window(window, confirmed)
        .await
        .map_err(|e| msg_error_anyhow!(Message::CleanupFailed(e.to_string())))?;

    Auditor::new(&db, RequestMeta::default())
        .record(audit::weekly_data_cleaned(&args.week_start, &args.week_end, &deleted))
        .await;

    msg_success!(Message::CleanupCompleted(deleted.tasks, deleted.locations, deleted.logs));
    Ok(())
}
