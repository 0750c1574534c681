//! Agent endpoints: weather, web search and computer use.
//!
//! The hosted-agent endpoints surface failures as 500 `{"detail": ...}`.
//! `/computer_use` always answers 200; its errors travel inside the result.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::agents::{self, web_search::DEFAULT_WEB_SEARCH_QUERY};

use super::error::ApiError;
use super::routes::AppState;
use super::types::{ComputerUseRequest, ComputerUseResponse, WeatherResponse, WebSearchResponse};

/// Ask the weather agent about today's weather.
pub async fn weather(State(state): State<Arc<AppState>>) -> Result<Json<WeatherResponse>, ApiError> {
    let weather_info = agents::get_weather_info(state.runner.as_ref())
        .await
        .map_err(|e| {
            tracing::error!("Weather query failed: {}", e);
            ApiError::from(e)
        })?;
    Ok(Json(WeatherResponse { weather_info }))
}

/// Run the research agent with the server-side default query.
pub async fn web_search(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WebSearchResponse>, ApiError> {
    let web_search_info =
        agents::get_web_search_info(state.runner.as_ref(), DEFAULT_WEB_SEARCH_QUERY)
            .await
            .map_err(|e| {
                tracing::error!("Web search failed: {}", e);
                ApiError::from(e)
            })?;
    Ok(Json(WebSearchResponse { web_search_info }))
}

/// Ask the model which computer action to take.
pub async fn computer_use(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ComputerUseRequest>,
) -> Json<ComputerUseResponse> {
    tracing::info!(
        "Computer use request: environment={}, display={}x{}, screenshot={}",
        req.environment,
        req.display_width,
        req.display_height,
        req.screenshot_base64.is_some()
    );
    let result = agents::run_computer_use(state.llm.as_ref(), req.into()).await;
    Json(ComputerUseResponse { result })
}
