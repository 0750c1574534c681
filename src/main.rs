//! weather-agent-api - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the agent API.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_agent_api::{api, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_agent_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a missing API key stops startup here.
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={}, api_base_url={}",
        config.default_model, config.api_base_url
    );

    api::serve(config).await?;

    Ok(())
}
