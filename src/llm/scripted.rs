//! A chat backend that replays canned responses.

use crate::llm::client::ChatBackend;
use crate::llm::error::LLMError;
use crate::llm::messages::{ChatResponse, Message};
use crate::tools::ToolDefinition;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Backend that returns queued responses in order and records every request.
///
/// Clones share the same queue and log, so a test can keep a handle after
/// moving the backend into an agent. An exhausted queue fails with a
/// network error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    state: Arc<Mutex<ScriptedState>>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    responses: VecDeque<Result<ChatResponse, LLMError>>,
    requests: Vec<Vec<Message>>,
    tool_names: Vec<Vec<String>>,
}

impl ScriptedBackend {
    /// Creates a backend that answers with `responses` in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = ChatResponse>) -> Self {
        let backend = Self::default();
        for response in responses {
            backend.push(Ok(response));
        }
        backend
    }

    /// Queues another result.
    pub fn push(&self, result: Result<ChatResponse, LLMError>) {
        self.lock().responses.push_back(result);
    }

    /// Returns the conversation sent with each request so far.
    #[must_use]
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.lock().requests.clone()
    }

    /// Returns the tool names offered with each request so far.
    #[must_use]
    pub fn offered_tools(&self) -> Vec<Vec<String>> {
        self.lock().tool_names.clone()
    }

    /// Returns how many requests were made.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatBackend for ScriptedBackend {
    fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<ChatResponse, LLMError> {
        let mut state = self.lock();
        state.requests.push(messages.to_vec());
        state
            .tool_names
            .push(tools.iter().map(|t| t.name.to_string()).collect());
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(LLMError::network("scripted backend has no more responses")))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order_then_fails() {
        let backend = ScriptedBackend::new([ChatResponse::text("one"), ChatResponse::text("two")]);
        let handle = backend.clone();

        assert_eq!(backend.complete(&[Message::user("a")], &[]).unwrap().content, "one");
        assert_eq!(backend.complete(&[Message::user("b")], &[]).unwrap().content, "two");
        assert!(backend.complete(&[], &[]).is_err());

        assert_eq!(handle.request_count(), 3);
        assert_eq!(handle.requests()[1][0].content, "b");
    }
}
