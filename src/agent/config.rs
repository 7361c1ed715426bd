//! Agent configuration.

use serde::{Deserialize, Serialize};

/// Default system prompt for the developer helper.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are to help a developer understand their project. \
You can ask them questions or query the files in their project to get more info. \
If they ask you to modify a file, you can do so by calling the 'write_file' tool.";

/// Default ceiling on tool-calling rounds per question.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 16;

/// Configuration for the tool-calling agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// The system prompt that defines the agent's behavior
    pub system_prompt: String,
    /// Maximum model responses with tool calls before the question is abandoned
    pub max_tool_rounds: usize,
}

impl AgentConfig {
    /// Creates a configuration with the given system prompt.
    ///
    /// # Examples
    ///
    /// ```
    /// use devhelper::agent::AgentConfig;
    ///
    /// let config = AgentConfig::new("You review Rust code.").with_max_tool_rounds(4);
    /// assert_eq!(config.max_tool_rounds, 4);
    /// ```
    #[must_use]
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Sets the tool round ceiling.
    #[must_use]
    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}
