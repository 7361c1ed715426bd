//! Provider configuration.
//!
//! Runtime settings for the OpenAI-compatible chat completions client.

use crate::llm::error::LLMError;
use std::time::Duration;

/// Default chat completions base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Configuration for the chat completions client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// The API key for authentication; `None` for local providers
    pub api_key: Option<String>,
    /// The model to use (e.g., "gpt-4")
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Base URL for the API, without the `/chat/completions` suffix
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Whether request and response bodies are logged at debug level
    pub log_requests: bool,
}

impl ProviderConfig {
    /// Creates a configuration for OpenAI with the given API key.
    ///
    /// # Examples
    ///
    /// ```
    /// use devhelper::llm::ProviderConfig;
    ///
    /// let config = ProviderConfig::openai("sk-...");
    /// assert_eq!(config.model, "gpt-4");
    /// assert_eq!(config.base_url, "https://api.openai.com/v1");
    /// ```
    #[must_use]
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Creates a configuration for a local OpenAI-compatible server that needs
    /// no API key.
    #[must_use]
    pub fn local(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: None,
            model: model.into(),
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the maximum tokens to generate.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables logging of request and response bodies.
    #[must_use]
    pub fn with_log_requests(mut self, log_requests: bool) -> Self {
        self.log_requests = log_requests;
        self
    }

    /// Checks the settings before a client is built.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty model, a base URL that is not
    /// http(s), a zero timeout or zero max tokens.
    pub fn validate(&self) -> Result<(), LLMError> {
        if self.model.trim().is_empty() {
            return Err(LLMError::invalid_config("model", "cannot be empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(LLMError::invalid_config(
                "base_url",
                format!("'{}' must start with http:// or https://", self.base_url),
            ));
        }
        if self.timeout.is_zero() {
            return Err(LLMError::invalid_config("timeout", "must be greater than zero"));
        }
        if self.max_tokens == 0 {
            return Err(LLMError::invalid_config("max_tokens", "must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            log_requests: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = ProviderConfig::local("http://localhost:11434/v1", "qwen2.5:7b")
            .with_max_tokens(512)
            .with_timeout(Duration::from_secs(300))
            .with_log_requests(true);

        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.model, "qwen2.5:7b");
        assert_eq!(config.max_tokens, 512);
        assert!(config.log_requests);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let err = ProviderConfig::default()
            .with_base_url("api.openai.com")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn validate_rejects_empty_model_and_zero_limits() {
        assert!(ProviderConfig::default().with_model(" ").validate().is_err());
        assert!(ProviderConfig::default().with_timeout(Duration::ZERO).validate().is_err());
        assert!(ProviderConfig::default().with_max_tokens(0).validate().is_err());
    }
}
