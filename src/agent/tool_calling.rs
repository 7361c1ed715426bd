//! The tool-calling agent loop.

use crate::agent::{Agent, AgentConfig};
use crate::error::DevHelperError;
use crate::llm::{ChatBackend, Message, ToolCall};
use crate::tools::{BuiltinTools, ToolDefinition, ToolError};
use serde_json::json;
use tracing::{debug, info, warn};

/// Appended to an answer the model could not finish.
pub const TRUNCATION_NOTICE: &str =
    "[answer cut short: the model reached its output token limit; raise provider.max_tokens for longer answers]";

/// Answers questions by letting a chat model call the built-in tools.
///
/// Each question starts a fresh conversation: the system prompt, then the
/// question. While the model asks for tools, every call is run in order and
/// its result fed back; the first reply without tool calls is the answer.
#[derive(Debug)]
pub struct ToolCallingAgent<B> {
    backend: B,
    tools: BuiltinTools,
    config: AgentConfig,
}

impl<B: ChatBackend> ToolCallingAgent<B> {
    /// Creates an agent with the default configuration.
    #[must_use]
    pub fn new(backend: B, tools: BuiltinTools) -> Self {
        Self::with_config(backend, tools, AgentConfig::default())
    }

    /// Creates an agent with the given configuration.
    #[must_use]
    pub fn with_config(backend: B, tools: BuiltinTools, config: AgentConfig) -> Self {
        Self {
            backend,
            tools,
            config,
        }
    }

    fn run_tool_call(&self, call: &ToolCall) -> String {
        debug!(tool = %call.name, id = %call.id, "model requested tool");
        match self.tools.call(&call.name, call.arguments.clone()) {
            Ok(value) => value.to_string(),
            Err(e) => tool_failure(&e),
        }
    }
}

/// Renders a tool failure the way the model sees it.
fn tool_failure(error: &ToolError) -> String {
    json!({
        "error": error.code(),
        "message": error.to_string(),
    })
    .to_string()
}

impl<B: ChatBackend> Agent for ToolCallingAgent<B> {
    fn ask(&mut self, question: &str) -> Result<String, DevHelperError> {
        let definitions: Vec<ToolDefinition> = self.tools.definitions();
        let mut messages = vec![
            Message::system(self.config.system_prompt.as_str()),
            Message::user(question),
        ];
        let mut rounds = 0;

        loop {
            let response = self.backend.complete(&messages, &definitions)?;

            if !response.has_tool_calls() {
                info!(
                    provider = self.backend.provider_name(),
                    rounds, "answer ready"
                );
                if response.is_truncated() {
                    warn!(rounds, "answer hit the token limit");
                    return Ok(format!("{}\n\n{TRUNCATION_NOTICE}", response.content));
                }
                return Ok(response.content);
            }

            if rounds >= self.config.max_tool_rounds {
                return Err(DevHelperError::agent(format!(
                    "model still requesting tools after {} rounds",
                    self.config.max_tool_rounds
                )));
            }
            rounds += 1;

            let results: Vec<Message> = response
                .tool_calls
                .iter()
                .map(|call| Message::tool(call.id.as_str(), self.run_tool_call(call)))
                .collect();

            messages.push(Message::assistant_with_tools(
                response.content,
                response.tool_calls,
            ));
            messages.extend(results);
        }
    }
}
