use fieldforce::commands::Cli;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let default_level = if std::env::var("FIELDFORCE_DEBUG").is_ok() { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    Cli::menu().await
}
