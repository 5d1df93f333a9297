//! Tanya Server - HTTP API for the library chat engine
//!
//! This binary serves the chat endpoint backed by the tanya answering
//! engine, with configuration from the environment and optional `.env`
//! files for local development.

use server::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development; deployment platforms inject real env.
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = ServerConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    // Start server
    server::start_server(config).await?;

    Ok(())
}
