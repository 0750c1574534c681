//! OpenAI API client: chat completions and single-call agent runs.
//!
//! Every method issues exactly one HTTP request. Failures are classified into
//! [`LlmError`] and returned to the caller; nothing is retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::LlmError;
use super::{ChatMessage, ChatResponse, LlmClient, ToolCall, ToolDefinition};
use crate::agents::{AgentDefinition, AgentRunner, HostedTool, RunResult};
use crate::config::Config;

/// OpenAI API client.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiClient {
    /// Create a client for the given API key and base URL (e.g. `https://api.openai.com/v1`).
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_model: default_model.into(),
        }
    }

    /// Create a client from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.clone(),
            config.api_base_url.clone(),
            config.default_model.clone(),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// POST a JSON body and return the raw success body.
    async fn post_json<T: Serialize>(&self, path: &str, request: &T) -> Result<String, LlmError> {
        let response = match self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    return Err(LlmError::network_error(format!("Request timeout: {}", e)));
                } else if e.is_connect() {
                    return Err(LlmError::network_error(format!("Connection failed: {}", e)));
                } else {
                    return Err(LlmError::network_error(format!("Request failed: {}", e)));
                }
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network_error(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), body));
        }

        Ok(body)
    }

    async fn execute_chat(&self, request: &ChatCompletionRequest) -> Result<ChatResponse, LlmError> {
        let body = self.post_json("chat/completions", request).await?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::parse_error(format!("Failed to parse response: {}, body: {}", e, body))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::parse_error("No choices in response".to_string()))?;

        tracing::debug!(
            "Chat completion finished: finish_reason={}",
            choice.finish_reason.as_deref().unwrap_or("unknown")
        );

        Ok(ChatResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
        })
    }

    async fn execute_run(&self, request: &ResponsesRequest) -> Result<RunResult, LlmError> {
        let body = self.post_json("responses", request).await?;

        let parsed: ResponsesResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::parse_error(format!("Failed to parse response: {}, body: {}", e, body))
        })?;

        let final_output = parsed
            .final_output_text()
            .ok_or_else(|| LlmError::parse_error("No text output in response".to_string()))?;

        Ok(RunResult { final_output })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> anyhow::Result<ChatResponse> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            tools: tools.map(|t| t.to_vec()),
            tool_choice: tools.map(|_| "auto".to_string()),
        };

        tracing::debug!("Sending chat completion: model={}", model);

        self.execute_chat(&request).await.map_err(|e| {
            tracing::error!("Chat completion failed: {}", e);
            anyhow::anyhow!("{}", e)
        })
    }
}

#[async_trait]
impl AgentRunner for OpenAiClient {
    async fn run(&self, agent: &AgentDefinition, input: &str) -> anyhow::Result<RunResult> {
        let request = ResponsesRequest::for_agent(agent, input, &self.default_model);

        tracing::debug!(
            "Running agent '{}': model={}, tools={}",
            agent.name,
            request.model,
            request.tools.len()
        );

        self.execute_run(&request).await.map_err(|e| {
            tracing::error!("Agent '{}' run failed: {}", agent.name, e);
            anyhow::anyhow!("{}", e)
        })
    }
}

/// Chat completions request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

/// Chat completions response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

/// Responses API request: one agent turn with hosted tools.
#[derive(Debug, Serialize)]
struct ResponsesRequest {
    model: String,
    instructions: String,
    input: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<HostedTool>,
}

impl ResponsesRequest {
    fn for_agent(agent: &AgentDefinition, input: &str, default_model: &str) -> Self {
        Self {
            model: agent
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            instructions: agent.instructions.clone(),
            input: input.to_string(),
            tools: agent.tools.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

impl ResponsesResponse {
    /// Text of the last assistant message that carries any output text.
    fn final_output_text(&self) -> Option<String> {
        self.output.iter().rev().find_map(|item| match item {
            OutputItem::Message { content } => {
                let text: String = content
                    .iter()
                    .filter_map(|part| match part {
                        OutputContent::OutputText { text } => Some(text.as_str()),
                        OutputContent::Other => None,
                    })
                    .collect();
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
            OutputItem::Other => None,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<OutputContent>,
    },
    /// Hosted tool calls, reasoning items, etc.
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputContent {
    OutputText {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{web_search, weather};
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = OpenAiClient::new("sk-test", "http://localhost:9000/v1/", "gpt-4o");
        assert_eq!(
            client.endpoint("chat/completions"),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn test_weather_agent_request() {
        let request = ResponsesRequest::for_agent(
            &weather::weather_agent(),
            weather::WEATHER_QUESTION,
            "gpt-4o-mini",
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["input"], weather::WEATHER_QUESTION);
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_research_agent_request_uses_default_model() {
        let request = ResponsesRequest::for_agent(&web_search::research_agent(), "q", "gpt-4o-mini");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["tools"][0]["type"], "web_search_preview");
        assert_eq!(value["tools"][0]["search_context_size"], "high");
        assert_eq!(value["tools"][0]["user_location"]["city"], "Tokyo");
    }

    #[test]
    fn test_final_output_skips_tool_items() {
        let response: ResponsesResponse = serde_json::from_value(json!({
            "id": "resp_1",
            "output": [
                {"type": "web_search_call", "id": "ws_1", "status": "completed"},
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        {"type": "output_text", "text": "Hello, ", "annotations": []},
                        {"type": "output_text", "text": "world", "annotations": []}
                    ]
                }
            ]
        }))
        .unwrap();
        assert_eq!(response.final_output_text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_final_output_uses_last_message() {
        let response: ResponsesResponse = serde_json::from_value(json!({
            "output": [
                {"type": "message", "content": [{"type": "output_text", "text": "first"}]},
                {"type": "message", "content": [{"type": "output_text", "text": "second"}]}
            ]
        }))
        .unwrap();
        assert_eq!(response.final_output_text().as_deref(), Some("second"));
    }

    #[test]
    fn test_final_output_missing() {
        let response: ResponsesResponse = serde_json::from_value(json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [{"type": "refusal", "refusal": "no"}]}
            ]
        }))
        .unwrap();
        assert!(response.final_output_text().is_none());
    }

    #[test]
    fn test_chat_response_parsing() {
        let parsed: ChatCompletionResponse = serde_json::from_value(json!({
            "model": "gpt-4o-2024-08-06",
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "computer_use", "arguments": "{\"action\":\"navigate\"}"}
                    }]
                }
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        }))
        .unwrap();
        let choice = &parsed.choices[0];
        assert!(choice.message.content.is_none());
        let calls = choice.message.tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.arguments, "{\"action\":\"navigate\"}");
        assert_eq!(choice.finish_reason.as_deref(), Some("tool_calls"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = OpenAiClient::new("sk-test", format!("http://127.0.0.1:{}/v1", port), "gpt-4o");
        let err = client
            .chat_completion("gpt-4o", &[], None)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Network error"));
    }
}
