//! Core types for agent definitions and runs.

use serde::{Deserialize, Serialize};

/// A provider-side configuration bundle: instructions, model and hosted tools.
///
/// Agents hold no state between runs; the same definition can be run any
/// number of times concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDefinition {
    /// Human-readable agent name (used in logs)
    pub name: String,

    /// System-level instructions sent with every run
    pub instructions: String,

    /// Model override. `None` runs on the runner's default model.
    pub model: Option<String>,

    /// Tools executed on the provider's infrastructure
    pub tools: Vec<HostedTool>,
}

impl AgentDefinition {
    /// Create an agent with no model override and no tools.
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: None,
            tools: Vec::new(),
        }
    }

    /// Pin the agent to a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach a hosted tool.
    pub fn with_tool(mut self, tool: HostedTool) -> Self {
        self.tools.push(tool);
        self
    }
}

/// A tool the provider runs itself while driving the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostedTool {
    #[serde(rename = "web_search_preview")]
    WebSearch(WebSearchTool),
}

/// Hosted web search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchTool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_location: Option<UserLocation>,
    pub search_context_size: SearchContextSize,
}

/// Approximate location used to localize search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    /// Always "approximate"
    #[serde(rename = "type")]
    pub location_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl UserLocation {
    /// Create an approximate location from a city and ISO country code.
    pub fn approximate(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            location_type: "approximate".to_string(),
            city: Some(city.into()),
            country: Some(country.into()),
        }
    }
}

/// How much retrieved web context the provider feeds the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchContextSize {
    Low,
    Medium,
    High,
}

/// Outcome of running an agent to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// The agent's final textual answer
    pub final_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_search_tool_wire_format() {
        let tool = HostedTool::WebSearch(WebSearchTool {
            user_location: Some(UserLocation::approximate("Tokyo", "JP")),
            search_context_size: SearchContextSize::High,
        });
        assert_eq!(
            serde_json::to_value(&tool).unwrap(),
            json!({
                "type": "web_search_preview",
                "user_location": {"type": "approximate", "city": "Tokyo", "country": "JP"},
                "search_context_size": "high"
            })
        );
    }

    #[test]
    fn test_builder() {
        let agent = AgentDefinition::new("a", "be nice").with_model("gpt-4o");
        assert_eq!(agent.model.as_deref(), Some("gpt-4o"));
        assert!(agent.tools.is_empty());
    }
}
