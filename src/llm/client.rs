//! The chat backend abstraction.

use crate::llm::error::LLMError;
use crate::llm::messages::{ChatResponse, Message};
use crate::tools::ToolDefinition;
use std::fmt::Debug;

/// A model that answers a conversation, optionally requesting tool calls.
///
/// Implemented by [`crate::llm::OpenAIClient`] for real providers and by
/// scripted backends in tests.
pub trait ChatBackend: Debug {
    /// Sends the conversation and the available tools, returning one completion.
    ///
    /// # Errors
    ///
    /// Returns an [`LLMError`] if the request fails or the response cannot be
    /// understood.
    fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<ChatResponse, LLMError>;

    /// Returns the provider name for logging.
    fn provider_name(&self) -> &'static str {
        "unknown"
    }
}

impl<B: ChatBackend + ?Sized> ChatBackend for Box<B> {
    fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<ChatResponse, LLMError> {
        (**self).complete(messages, tools)
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
