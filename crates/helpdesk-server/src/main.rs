//! Server entry point.

use helpdesk_server::{AppState, ServerConfig, app};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Connect and migrate before the listener starts; requests never
    // race connection setup.
    let db = helpdesk_db::connect(&config.db).await?;
    helpdesk_db::run_migrations(&db).await?;

    let state = AppState::new(db, config.auth.clone(), config.assist.clone())?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Helpdesk server listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
