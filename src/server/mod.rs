//! HTTP surface of the field service backend.
//!
//! [`router::build_router`] wires every `/api` route onto a shared
//! [`AppState`]; [`serve`] binds it to the configured address and runs until
//! Ctrl-C.

mod error;
pub mod handlers;
mod meta;
pub mod router;

pub use error::ApiError;

use crate::libs::{
    config::{Config, ServerConfig},
    emergency::EmergencyContact,
    messages::Message,
    storage::SharedStorage,
};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub storage: SharedStorage,
    pub contacts: Arc<Vec<EmergencyContact>>,
}

impl AppState {
    pub fn new(storage: SharedStorage, config: &Config) -> Self {
        Self {
            storage,
            contacts: Arc::new(config.contacts()),
        }
    }
}

pub async fn serve(state: AppState, server: &ServerConfig) -> Result<()> {
    let app = router::build_router(state, &server.cors_origins);
    let address = server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("{}", Message::ServerListening(address));
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("{}", Message::ServerStopped);

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
