//! OpenAI-compatible chat completions client.
//!
//! Blocking HTTP client for OpenAI and compatible endpoints (Ollama, vLLM,
//! LocalAI). One request per call, no streaming and no retries.

use crate::llm::client::ChatBackend;
use crate::llm::config::ProviderConfig;
use crate::llm::error::LLMError;
use crate::llm::messages::{ChatResponse, Message, MessageRole, StopReason, ToolCall};
use crate::tools::ToolDefinition;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Client for OpenAI-compatible APIs.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    /// HTTP client
    client: Client,
    /// Base URL for the API
    base_url: String,
    /// API key (optional for local providers)
    api_key: Option<String>,
    /// Model name
    model: String,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Log request and response bodies
    log_requests: bool,
}

/// Request body for the chat completions API.
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
    stream: bool,
}

/// A message in OpenAI format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAIToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

/// A tool definition in OpenAI format.
#[derive(Debug, Clone, Serialize)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAIFunction,
}

/// A function definition in OpenAI format.
#[derive(Debug, Clone, Serialize)]
struct OpenAIFunction {
    name: String,
    description: String,
    parameters: Value,
}

/// A tool call in OpenAI format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: OpenAIFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

/// A function call in OpenAI format. Arguments are a JSON document encoded
/// as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

/// Response from the chat completions API.
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

/// A choice in the response.
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionChoice {
    message: OpenAIMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Error response from the API.
#[derive(Debug, Clone, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIErrorDetail,
}

/// Error detail from the API.
#[derive(Debug, Clone, Deserialize)]
struct OpenAIErrorDetail {
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
    message: String,
}

impl OpenAIClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate, or
    /// `Network` if the HTTP client cannot be created.
    pub fn new(config: &ProviderConfig) -> Result<Self, LLMError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LLMError::network(format!("failed to create HTTP client: {}", e)))?;

        let api_key = config.api_key.clone().filter(|key| !key.is_empty());

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            log_requests: config.log_requests,
        })
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the chat completions endpoint URL.
    fn chat_completions_endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Converts internal messages to OpenAI API format.
    fn convert_messages(messages: &[Message]) -> Vec<OpenAIMessage> {
        messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::System | MessageRole::User => OpenAIMessage {
                    role: msg.role.to_string(),
                    content: Some(msg.content.clone()),
                    tool_calls: None,
                    tool_call_id: None,
                },
                MessageRole::Assistant => {
                    let tool_calls = msg.tool_calls.as_ref().map(|tcs| {
                        tcs.iter()
                            .map(|tc| OpenAIToolCall {
                                id: tc.id.clone(),
                                call_type: function_type(),
                                function: OpenAIFunctionCall {
                                    name: tc.name.clone(),
                                    arguments: tc.arguments.to_string(),
                                },
                            })
                            .collect()
                    });

                    OpenAIMessage {
                        role: msg.role.to_string(),
                        content: if msg.content.is_empty() {
                            None
                        } else {
                            Some(msg.content.clone())
                        },
                        tool_calls,
                        tool_call_id: None,
                    }
                }
                MessageRole::Tool => OpenAIMessage {
                    role: msg.role.to_string(),
                    content: Some(msg.content.clone()),
                    tool_calls: None,
                    tool_call_id: msg.tool_call_id.clone(),
                },
            })
            .collect()
    }

    /// Converts tool definitions to OpenAI API format.
    fn convert_tools(tools: &[ToolDefinition]) -> Vec<OpenAITool> {
        tools
            .iter()
            .map(|t| OpenAITool {
                tool_type: function_type(),
                function: OpenAIFunction {
                    name: t.name.to_string(),
                    description: t.description.to_string(),
                    parameters: t.input_schema(),
                },
            })
            .collect()
    }

    /// Parses the stop reason to internal format.
    #[must_use]
    pub fn parse_stop_reason(reason: Option<&str>) -> StopReason {
        match reason {
            Some("length") => StopReason::MaxTokens,
            Some("tool_calls") => StopReason::ToolUse,
            _ => StopReason::EndTurn,
        }
    }

    /// Parses a successful response body.
    ///
    /// Tool call arguments that are not valid JSON are kept as a JSON string
    /// so the call is still answered and the tool reports the bad arguments.
    fn parse_completion(body: &str) -> Result<ChatResponse, LLMError> {
        let completion: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| LLMError::parse_error(format!("failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::parse_error("response contained no choices"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                let raw = tc.function.arguments;
                let arguments = if raw.trim().is_empty() {
                    Value::Object(serde_json::Map::new())
                } else {
                    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
                };
                ToolCall {
                    id: tc.id,
                    name: tc.function.name,
                    arguments,
                }
            })
            .collect();

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            stop_reason: Self::parse_stop_reason(choice.finish_reason.as_deref()),
        })
    }

    /// Maps an error response to an [`LLMError`].
    fn parse_error_response(status_code: u16, canonical_reason: Option<&str>, body: &str) -> LLMError {
        if let Ok(api_error) = serde_json::from_str::<OpenAIErrorResponse>(body) {
            let detail = api_error.error;
            let is_auth = status_code == 401
                || [detail.error_type.as_deref(), detail.code.as_deref()]
                    .iter()
                    .any(|v| matches!(v, Some("authentication_error" | "invalid_api_key")));
            if is_auth {
                return LLMError::authentication_failed(detail.message);
            }
            return LLMError::api_error(status_code, detail.message, detail.error_type);
        }

        if status_code == 401 {
            return LLMError::authentication_failed(canonical_reason.unwrap_or("unauthorized"));
        }

        LLMError::api_error(
            status_code,
            if body.trim().is_empty() {
                canonical_reason.unwrap_or("Unknown error")
            } else {
                body
            },
            None,
        )
    }
}

impl ChatBackend for OpenAIClient {
    fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<ChatResponse, LLMError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            max_tokens: Some(self.max_tokens),
            messages: Self::convert_messages(messages),
            tools: if tools.is_empty() {
                None
            } else {
                Some(Self::convert_tools(tools))
            },
            stream: false,
        };

        if self.log_requests {
            match serde_json::to_string(&request_body) {
                Ok(json) => debug!(body = %json, "chat completion request"),
                Err(e) => debug!(error = %e, "chat completion request not serializable"),
            }
        }

        let mut request = self
            .client
            .post(self.chat_completions_endpoint())
            .header("content-type", "application/json")
            .json(&request_body);

        if let Some(ref api_key) = self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                LLMError::network(format!("request timed out: {}", e))
            } else {
                LLMError::network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| LLMError::network(format!("failed to read response body: {}", e)))?;

        if self.log_requests {
            debug!(status = status.as_u16(), body = %body, "chat completion response");
        }

        if !status.is_success() {
            return Err(Self::parse_error_response(
                status.as_u16(),
                status.canonical_reason(),
                &body,
            ));
        }

        Self::parse_completion(&body)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
