//! Rentwise server binary.

mod bootstrap;

use tracing_subscriber::EnvFilter;

use bootstrap::{bootstrap, StartupError};
use rentwise::config::{AppConfig, ServerConfig};

fn init_logging(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .pretty()
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    run().await
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_logging(&config.server);
    config.validate()?;

    let app = bootstrap(&config).await?;

    let listener = tokio::net::TcpListener::bind(app.addr).await?;
    tracing::info!(addr = %app.addr, "rentwise listening");

    axum::serve(listener, app.router)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    tracing::info!("rentwise stopped");
    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
