use super::open_database;
use crate::{
    db::db::Db,
    libs::messages::Message,
    server::{self, AppState},
};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, help = "Host to bind, overrides configuration")]
    host: Option<String>,
    #[arg(short, long, help = "Port to bind, overrides configuration")]
    port: Option<u16>,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    let (config, db) = open_database()?;
    info!("{}", Message::DatabaseOpened(Db::resolve_path(&config)?.display().to_string()));

    let mut server_config = config.server_config();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    let state = AppState::new(Arc::new(db), &config);
    server::serve(state, &server_config).await
}
