use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{config::Config, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show current database version
    Status,
    /// Show migration history
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let config = Config::read()?.with_env_overrides();
    let conn = Db::new_without_migrations(&config)?;

    match args.command {
        MigrationsCommand::Status => {
            msg_print!(Message::DatabaseVersion(get_db_version(&conn)?));
            msg_print!(Message::LatestVersion(MigrationManager::new().latest_version()));
            if needs_migration(&conn)? {
                msg_info!(Message::DatabaseNeedsMigration);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            let history = MigrationManager::new().get_migration_history(&conn).unwrap_or_default();
            if history.is_empty() {
                msg_info!(Message::NoMigrationsApplied);
            } else {
                msg_print!(Message::MigrationHistoryHeader, true);
                View::migration_history(&history)?;
            }
        }
    }

    Ok(())
}
