//! Research agent backed by the provider's hosted web search.

use super::{AgentDefinition, AgentRunner, HostedTool, SearchContextSize, UserLocation, WebSearchTool};

const RESEARCH_AGENT_INSTRUCTIONS: &str = "あなたは研究アシスタントです。ユーザーの質問に対して、最新の情報を含む詳細かつ正確な回答を提供してください。";

/// Query used by `GET /web_search`, which takes no caller input.
pub const DEFAULT_WEB_SEARCH_QUERY: &str = "最新のテクノロジートレンドについて教えてください";

/// Web search tool localized to Tokyo with a high search context size.
pub fn web_search_tool() -> WebSearchTool {
    WebSearchTool {
        user_location: Some(UserLocation::approximate("Tokyo", "JP")),
        search_context_size: SearchContextSize::High,
    }
}

/// Build the research agent definition. Runs on the runner's default model.
pub fn research_agent() -> AgentDefinition {
    AgentDefinition::new("Research Agent", RESEARCH_AGENT_INSTRUCTIONS)
        .with_tool(HostedTool::WebSearch(web_search_tool()))
}

/// Run the research agent with `query` and return its final answer.
///
/// The query is passed through as-is. Provider errors are returned unchanged.
pub async fn get_web_search_info(runner: &dyn AgentRunner, query: &str) -> anyhow::Result<String> {
    let agent = research_agent();
    tracing::debug!("Running {} (query: {} chars)", agent.name, query.chars().count());
    let result = runner.run(&agent, query).await?;
    Ok(result.final_output)
}
