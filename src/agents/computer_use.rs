//! Computer use: ask the model which action to take on a virtual display.
//!
//! The model is offered a single `computer_use` function tool whose schema
//! carries the display configuration. The tool calls it elects to make are
//! returned to the caller as parsed JSON; nothing is executed locally.
//!
//! Unlike the hosted agents, failures here never escape: they are folded into
//! the returned [`ComputerUseResult`].

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::llm::{ChatMessage, LlmClient, Role, ToolDefinition};

pub const COMPUTER_USE_TOOL_NAME: &str = "computer_use";
/// Model used for computer-use requests, independent of the configured default.
pub const COMPUTER_USE_MODEL: &str = "gpt-4o";
pub const DEFAULT_ENVIRONMENT: &str = "browser";
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1024;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 768;

/// Environments declared in the tool schema.
pub const ENVIRONMENTS: [&str; 4] = ["browser", "mac", "windows", "ubuntu"];

const DATA_URI_IMAGE_PREFIX: &str = "data:image/";
const ERROR_CONTENT_PREFIX: &str = "エラーが発生しました: ";

/// Input for a computer-use request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerUseParams {
    pub instruction: String,
    /// One of [`ENVIRONMENTS`]; not checked before sending.
    pub environment: String,
    pub display_width: u32,
    pub display_height: u32,
    /// Base64 screenshot, with or without a `data:image/...;base64,` prefix.
    pub screenshot_base64: Option<String>,
}

impl ComputerUseParams {
    /// Params with the default environment and display size.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            screenshot_base64: None,
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub name: String,
    pub arguments: Value,
}

/// Normalized outcome of a computer-use request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputerUseResult {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCallResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComputerUseResult {
    /// Result carrying an error in place of model output.
    pub fn from_error(error: &anyhow::Error) -> Self {
        let message = error.to_string();
        Self {
            content: Some(format!("{}{}", ERROR_CONTENT_PREFIX, message)),
            tool_calls: Vec::new(),
            error: Some(message),
        }
    }
}

/// Build the image reference for a screenshot, failing if it is not valid base64.
///
/// Already-prefixed data URIs are returned unchanged; bare base64 gets a
/// `data:image/png;base64,` prefix.
pub fn screenshot_image_url(screenshot: &str) -> Result<String, base64::DecodeError> {
    let payload = if screenshot.starts_with(DATA_URI_IMAGE_PREFIX) {
        screenshot
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or(base64::DecodeError::InvalidPadding)?
    } else {
        screenshot
    };

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD.decode(compact.as_bytes())?;

    if screenshot.starts_with(DATA_URI_IMAGE_PREFIX) {
        Ok(screenshot.to_string())
    } else {
        Ok(format!("data:image/png;base64,{}", screenshot))
    }
}

/// Build the outbound messages for an instruction and optional screenshot.
///
/// An empty or undecodable screenshot falls back to the text-only message.
pub fn build_messages(instruction: &str, screenshot_base64: Option<&str>) -> Vec<ChatMessage> {
    if let Some(screenshot) = screenshot_base64.filter(|s| !s.is_empty()) {
        match screenshot_image_url(screenshot) {
            Ok(image_url) => {
                return vec![ChatMessage::with_image(Role::User, instruction, image_url)];
            }
            Err(e) => {
                tracing::warn!(
                    "Screenshot is not valid base64, continuing without image: {}",
                    e
                );
            }
        }
    }

    vec![ChatMessage::new(Role::User, instruction)]
}

/// The `computer_use` function tool, with the display configuration as schema defaults.
pub fn computer_use_tool(display_width: u32, display_height: u32, environment: &str) -> ToolDefinition {
    ToolDefinition::function(
        COMPUTER_USE_TOOL_NAME,
        "Control a virtual computer to perform tasks",
        json!({
            "type": "object",
            "properties": {
                "configuration": {
                    "type": "object",
                    "properties": {
                        "display_width": {
                            "type": "integer",
                            "default": display_width
                        },
                        "display_height": {
                            "type": "integer",
                            "default": display_height
                        },
                        "environment": {
                            "type": "string",
                            "enum": ENVIRONMENTS,
                            "default": environment
                        }
                    }
                }
            }
        }),
    )
}

/// Send one computer-use request and normalize the model's reply.
///
/// Never fails: provider errors and malformed tool arguments come back as a
/// result with `error` set and no tool calls.
pub async fn run_computer_use(client: &dyn LlmClient, params: ComputerUseParams) -> ComputerUseResult {
    let messages = build_messages(&params.instruction, params.screenshot_base64.as_deref());
    let tools = [computer_use_tool(
        params.display_width,
        params.display_height,
        &params.environment,
    )];

    match request_tool_calls(client, COMPUTER_USE_MODEL, &messages, &tools).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Computer use request failed: {}", e);
            ComputerUseResult::from_error(&e)
        }
    }
}

async fn request_tool_calls(
    client: &dyn LlmClient,
    model: &str,
    messages: &[ChatMessage],
    tools: &[ToolDefinition],
) -> anyhow::Result<ComputerUseResult> {
    let response = client.chat_completion(model, messages, Some(tools)).await?;

    let mut tool_calls = Vec::new();
    for call in response.tool_calls.unwrap_or_default() {
        if call.function.name != COMPUTER_USE_TOOL_NAME {
            tracing::debug!("Ignoring undeclared tool call '{}'", call.function.name);
            continue;
        }
        let arguments: Value = serde_json::from_str(&call.function.arguments)?;
        tool_calls.push(ToolCallResult {
            name: call.function.name,
            arguments,
        });
    }

    Ok(ComputerUseResult {
        content: response.content,
        tool_calls,
        error: None,
    })
}
