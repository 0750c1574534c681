//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agents::AgentRunner;
use crate::config::Config;
use crate::llm::{LlmClient, OpenAiClient};

use super::agents as agents_api;
use super::types::StatusResponse;

/// Request body limit; base64 screenshots of a full display run to several MB.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Shared application state, built once at startup.
pub struct AppState {
    pub config: Config,
    /// Chat completion client used for computer use
    pub llm: Arc<dyn LlmClient>,
    /// Runs hosted agents to completion
    pub runner: Arc<dyn AgentRunner>,
}

impl AppState {
    /// Build state backed by the OpenAI API.
    pub fn from_config(config: Config) -> Self {
        let client = Arc::new(OpenAiClient::from_config(&config));
        Self {
            config,
            llm: Arc::clone(&client) as Arc<dyn LlmClient>,
            runner: client,
        }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/weather", get(agents_api::weather))
        .route("/web_search", get(agents_api::web_search))
        .route("/computer_use", post(agents_api::computer_use))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::from_config(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Liveness endpoint.
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Weather Agent API is running".to_string(),
    })
}
