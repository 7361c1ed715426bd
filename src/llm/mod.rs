//! Model provider binding.
//!
//! A thin, blocking client for OpenAI-compatible chat completions endpoints,
//! behind the [`ChatBackend`] trait so the agent loop can run against a
//! scripted backend in tests.

mod client;
mod config;
mod error;
mod messages;
mod openai;
mod scripted;

pub use client::ChatBackend;
pub use config::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{LLMError, LLMErrorKind};
pub use messages::{ChatResponse, Message, MessageRole, StopReason, ToolCall};
pub use openai::OpenAIClient;
pub use scripted::ScriptedBackend;
