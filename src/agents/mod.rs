//! Agents module - hosted agents and the computer-use tool call.
//!
//! # Use cases
//! - **weather**: fixed-question agent with a pinned model
//! - **web_search**: research agent with hosted web search
//! - **computer_use**: single chat completion declaring a `computer_use` tool
//!
//! Each use case is a free function over an injected provider capability
//! (`AgentRunner` or `LlmClient`), so none of them touch process-wide state.

pub mod computer_use;
mod types;
pub mod weather;
pub mod web_search;

pub use computer_use::{run_computer_use, ComputerUseParams, ComputerUseResult, ToolCallResult};
pub use types::{
    AgentDefinition, HostedTool, RunResult, SearchContextSize, UserLocation, WebSearchTool,
};
pub use weather::get_weather_info;
pub use web_search::get_web_search_info;

use async_trait::async_trait;

/// Drives an agent on the provider until it produces a final output.
///
/// From this crate's point of view a run is a single opaque suspension point;
/// any reasoning steps or hosted tool calls happen on the provider side.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Run `agent` with `input` as the user turn.
    ///
    /// # Errors
    /// Returns `Err` on network, authentication or provider failures, or when
    /// the provider produced no textual output.
    async fn run(&self, agent: &AgentDefinition, input: &str) -> anyhow::Result<RunResult>;
}
