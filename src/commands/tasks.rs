use super::open_database;
use crate::{
    libs::{
        messages::Message,
        priority::{self, DEFAULT_LIMIT},
        storage::Storage,
        task::TaskFilter,
        view::View,
        window,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TasksArgs {
    #[arg(help = "Employee id")]
    employee_id: i64,
    #[arg(short, long, help = "Show the five most urgent pending tasks by heuristic score")]
    prioritized: bool,
}

pub async fn cmd(args: TasksArgs) -> Result<()> {
    let (_, db) = open_database()?;

    if args.prioritized {
        let pending = db.tasks(TaskFilter::PendingForEmployee(args.employee_id)).await?;
        if pending.is_empty() {
            msg_info!(Message::TasksNotFound);
            return Ok(());
        }
        let ranked = priority::prioritize(pending, window::now(), &mut rand::thread_rng(), DEFAULT_LIMIT);
        msg_print!(Message::PrioritizedTasksHeader(args.employee_id), true);
        View::prioritized(&ranked)?;
        return Ok(());
    }

    let tasks = db.tasks(TaskFilter::ByEmployee(args.employee_id)).await?;
    if tasks.is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }
    msg_print!(Message::TasksHeader(args.employee_id), true);
    View::tasks(&tasks)?;
    Ok(())
}
