//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::agents::computer_use::{
    ComputerUseParams, ComputerUseResult, DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH,
    DEFAULT_ENVIRONMENT,
};

/// Liveness response for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

/// Response for `GET /weather`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub weather_info: String,
}

/// Response for `GET /web_search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResponse {
    pub web_search_info: String,
}

/// Request body for `POST /computer_use`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputerUseRequest {
    /// What the user wants done on the computer
    pub instruction: String,

    /// Target environment: "browser", "mac", "windows" or "ubuntu"
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_display_width")]
    pub display_width: u32,

    #[serde(default = "default_display_height")]
    pub display_height: u32,

    /// Optional base64 screenshot of the current display
    #[serde(default)]
    pub screenshot_base64: Option<String>,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_display_width() -> u32 {
    DEFAULT_DISPLAY_WIDTH
}

fn default_display_height() -> u32 {
    DEFAULT_DISPLAY_HEIGHT
}

impl From<ComputerUseRequest> for ComputerUseParams {
    fn from(req: ComputerUseRequest) -> Self {
        Self {
            instruction: req.instruction,
            environment: req.environment,
            display_width: req.display_width,
            display_height: req.display_height,
            screenshot_base64: req.screenshot_base64,
        }
    }
}

/// Response for `POST /computer_use`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputerUseResponse {
    pub result: ComputerUseResult,
}

/// Error body for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_computer_use_request_defaults() {
        let req: ComputerUseRequest =
            serde_json::from_value(json!({"instruction": "open bing.com"})).unwrap();
        let params = ComputerUseParams::from(req);
        assert_eq!(params, ComputerUseParams::new("open bing.com"));
    }

    #[test]
    fn test_computer_use_request_rejects_negative_size() {
        let result = serde_json::from_value::<ComputerUseRequest>(json!({
            "instruction": "open",
            "display_width": -1
        }));
        assert!(result.is_err());
    }
}
