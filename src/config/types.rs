//! Configuration types.

use crate::agent::{AgentConfig, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_SYSTEM_PROMPT};
use crate::error::DevHelperError;
use crate::llm::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::logging::LoggingConfig;
use crate::tools::{BuiltinTools, FileTools};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure for devhelper.
///
/// Maps directly to the TOML configuration file:
///
/// ```toml
/// max_tool_rounds = 16
/// read_only = false
/// tools = ["list_files", "read_file", "write_file"]
///
/// [provider]
/// model = "gpt-4"
/// api_key_env = "OPENAI_API_KEY"
///
/// [logging]
/// level = "warn"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevHelperConfig {
    /// Overrides the built-in system prompt.
    pub system_prompt: Option<String>,
    /// Maximum tool-calling rounds per question.
    pub max_tool_rounds: usize,
    /// Only offer tools that never change the project.
    pub read_only: bool,
    /// Tools offered to the agent, in this order. All built-in tools when absent.
    pub tools: Option<Vec<String>>,
    /// Model provider settings.
    pub provider: ProviderSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl DevHelperConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the system prompt in effect.
    #[must_use]
    pub fn effective_system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    /// Builds the agent configuration.
    #[must_use]
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig::new(self.effective_system_prompt()).with_max_tool_rounds(self.max_tool_rounds)
    }

    /// Builds the tool registry: the configured tools (or all of them), minus
    /// the mutating ones in read-only mode.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown tool name.
    pub fn tool_registry(&self, files: FileTools) -> Result<BuiltinTools, DevHelperError> {
        let tools = match self.tools {
            Some(ref names) => BuiltinTools::select(files, names.as_slice())
                .map_err(|e| DevHelperError::configuration("tools", e.to_string()))?,
            None => BuiltinTools::all(files),
        };

        Ok(if self.read_only {
            tools.without_mutating()
        } else {
            tools
        })
    }

    /// Checks values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending field.
    pub fn validate(&self) -> Result<(), DevHelperError> {
        if self.max_tool_rounds == 0 {
            return Err(DevHelperError::configuration(
                "max_tool_rounds",
                "must be at least 1",
            ));
        }
        if self.system_prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(DevHelperError::configuration(
                "system_prompt",
                "cannot be blank; remove the key to use the default",
            ));
        }
        if let Some(ref names) = self.tools {
            if names.is_empty() {
                return Err(DevHelperError::configuration(
                    "tools",
                    "cannot be empty; remove the key to offer every tool",
                ));
            }
            let available = BuiltinTools::available();
            let unknown = names
                .iter()
                .find(|n| !available.iter().any(|a| *a == n.as_str()));
            if let Some(unknown) = unknown {
                return Err(DevHelperError::configuration(
                    "tools",
                    format!("unknown tool '{unknown}'; choose from {}", available.join(", ")),
                ));
            }
        }
        self.provider.validate()
    }
}

impl Default for DevHelperConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            read_only: false,
            tools: None,
            provider: ProviderSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// The `[provider]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// The model to use.
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Direct API key value (discouraged - use api_key_env instead).
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl ProviderSettings {
    /// Returns the API key: the direct value if set, otherwise the named
    /// environment variable. Empty values count as absent.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| {
                self.api_key_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|key| !key.is_empty())
            })
    }

    /// Builds the runtime provider configuration.
    #[must_use]
    pub fn to_provider_config(&self, log_requests: bool) -> ProviderConfig {
        ProviderConfig {
            api_key: self.resolve_api_key(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            log_requests,
        }
    }

    fn validate(&self) -> Result<(), DevHelperError> {
        if self.timeout_secs == 0 {
            return Err(DevHelperError::configuration(
                "provider.timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.max_tokens == 0 {
            return Err(DevHelperError::configuration(
                "provider.max_tokens",
                "must be greater than zero",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(DevHelperError::configuration("provider.model", "cannot be empty"));
        }
        Ok(())
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            timeout_secs: 60,
            max_tokens: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::security::{AlwaysApprove, ProjectRoot};
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = DevHelperConfig::default();
        assert_eq!(config.max_tool_rounds, 16);
        assert!(!config.read_only);
        assert_eq!(config.provider.model, "gpt-4");
        assert_eq!(config.provider.api_key_env.as_deref(), Some("OPENAI_API_KEY"));
        assert_eq!(config.effective_system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn agent_config_carries_overrides() {
        let config = DevHelperConfig {
            system_prompt: Some("Be brief.".to_string()),
            max_tool_rounds: 3,
            ..Default::default()
        };
        let agent = config.agent_config();
        assert_eq!(agent.system_prompt, "Be brief.");
        assert_eq!(agent.max_tool_rounds, 3);
    }

    fn files(dir: &TempDir) -> FileTools {
        FileTools::new(ProjectRoot::new(dir.path()).unwrap(), AlwaysApprove)
    }

    fn names(tools: &BuiltinTools) -> Vec<&'static str> {
        tools.definitions().iter().map(|d| d.name).collect()
    }

    #[test]
    fn registry_offers_every_tool_by_default() {
        let dir = TempDir::new().unwrap();
        let tools = DevHelperConfig::default().tool_registry(files(&dir)).unwrap();
        assert_eq!(names(&tools), BuiltinTools::available());
    }

    #[test]
    fn read_only_registry_has_no_mutating_tools() {
        let dir = TempDir::new().unwrap();
        let config = DevHelperConfig {
            read_only: true,
            ..Default::default()
        };
        let tools = config.tool_registry(files(&dir)).unwrap();
        assert_eq!(names(&tools), vec!["list_files", "read_file"]);
    }

    #[test]
    fn configured_tools_keep_their_order() {
        let dir = TempDir::new().unwrap();
        let config = DevHelperConfig {
            tools: Some(vec!["read_file".to_string(), "delete_file".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let tools = config.tool_registry(files(&dir)).unwrap();
        assert_eq!(names(&tools), vec!["read_file", "delete_file"]);

        let read_only = DevHelperConfig {
            read_only: true,
            ..config
        };
        let tools = read_only.tool_registry(files(&dir)).unwrap();
        assert_eq!(names(&tools), vec!["read_file"]);
    }

    #[test]
    fn unknown_or_empty_tool_list_rejected() {
        let unknown = DevHelperConfig {
            tools: Some(vec!["read_file".to_string(), "bash".to_string()]),
            ..Default::default()
        };
        let err = unknown.validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("unknown tool 'bash'"));

        let dir = TempDir::new().unwrap();
        assert!(unknown.tool_registry(files(&dir)).unwrap_err().is_configuration());

        let empty = DevHelperConfig {
            tools: Some(Vec::new()),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn direct_key_wins_over_env() {
        let settings = ProviderSettings {
            api_key: Some("direct".to_string()),
            api_key_env: Some("DEVHELPER_TEST_UNSET_VARIABLE".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.resolve_api_key().as_deref(), Some("direct"));
    }

    #[test]
    fn missing_env_var_means_no_key() {
        let settings = ProviderSettings {
            api_key: Some(String::new()),
            api_key_env: Some("DEVHELPER_TEST_UNSET_VARIABLE".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.resolve_api_key(), None);
    }

    #[test]
    fn provider_config_conversion() {
        let settings = ProviderSettings {
            api_key: Some("k".to_string()),
            timeout_secs: 5,
            ..Default::default()
        };
        let provider = settings.to_provider_config(true);
        assert_eq!(provider.timeout, Duration::from_secs(5));
        assert_eq!(provider.api_key.as_deref(), Some("k"));
        assert!(provider.log_requests);
    }

    #[test]
    fn validate_rejects_nonsense() {
        let zero_rounds = DevHelperConfig {
            max_tool_rounds: 0,
            ..Default::default()
        };
        assert!(zero_rounds.validate().unwrap_err().to_string().contains("max_tool_rounds"));

        let blank_prompt = DevHelperConfig {
            system_prompt: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank_prompt.validate().is_err());

        let mut zero_timeout = DevHelperConfig::default();
        zero_timeout.provider.timeout_secs = 0;
        assert!(zero_timeout
            .validate()
            .unwrap_err()
            .to_string()
            .contains("provider.timeout_secs"));
    }
}
