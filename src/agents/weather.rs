//! Weather agent: answers a fixed question about today's weather in Tokyo.

use super::{AgentDefinition, AgentRunner};

const WEATHER_AGENT_INSTRUCTIONS: &str = "あなたは天気情報を提供するエージェントです。ユーザーの質問に対して、丁寧に天気情報を回答してください。";

/// Question asked on every weather query.
pub const WEATHER_QUESTION: &str = "今日の東京の天気を教えてください。";

/// Model the weather agent is pinned to.
pub const WEATHER_MODEL: &str = "gpt-4o";

/// Build the weather agent definition.
pub fn weather_agent() -> AgentDefinition {
    AgentDefinition::new("weather_agent", WEATHER_AGENT_INSTRUCTIONS).with_model(WEATHER_MODEL)
}

/// Run the weather agent once and return its final answer.
///
/// Every call is a fresh provider run; nothing is cached. Provider errors are
/// returned unchanged.
pub async fn get_weather_info(runner: &dyn AgentRunner) -> anyhow::Result<String> {
    let agent = weather_agent();
    tracing::debug!("Running {} with fixed question", agent.name);
    let result = runner.run(&agent, WEATHER_QUESTION).await?;
    Ok(result.final_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::RunResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(AgentDefinition, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl AgentRunner for RecordingRunner {
        async fn run(&self, agent: &AgentDefinition, input: &str) -> anyhow::Result<RunResult> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((agent.clone(), input.to_string()));
            if self.fail {
                anyhow::bail!("provider unavailable");
            }
            Ok(RunResult {
                final_output: format!("sunny #{}", calls.len()),
            })
        }
    }

    #[tokio::test]
    async fn test_runs_fixed_question_on_pinned_model() {
        let runner = RecordingRunner::default();
        let info = get_weather_info(&runner).await.unwrap();
        assert_eq!(info, "sunny #1");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.name, "weather_agent");
        assert_eq!(calls[0].0.model.as_deref(), Some("gpt-4o"));
        assert!(calls[0].0.tools.is_empty());
        assert_eq!(calls[0].1, WEATHER_QUESTION);
    }

    #[tokio::test]
    async fn test_each_call_hits_the_provider() {
        let runner = RecordingRunner::default();
        let first = get_weather_info(&runner).await.unwrap();
        let second = get_weather_info(&runner).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(runner.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let runner = RecordingRunner {
            fail: true,
            ..Default::default()
        };
        let err = get_weather_info(&runner).await.unwrap_err();
        assert_eq!(err.to_string(), "provider unavailable");
    }
}
