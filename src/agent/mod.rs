//! The agent boundary.
//!
//! An [`Agent`] turns a question into an answer. How it gets there (which
//! tools it calls, in what order, how it phrases the reply) is up to the
//! model behind it. [`ToolCallingAgent`] is the binding to a chat model with
//! the built-in project tools.

mod config;
mod tool_calling;

pub use config::{AgentConfig, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_SYSTEM_PROMPT};
pub use tool_calling::{ToolCallingAgent, TRUNCATION_NOTICE};

use crate::error::DevHelperError;

/// Something that answers developer questions.
pub trait Agent {
    /// Answers one question.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer could be produced. Tool failures are not
    /// errors here; they are reported to the model.
    fn ask(&mut self, question: &str) -> Result<String, DevHelperError>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn ask(&mut self, question: &str) -> Result<String, DevHelperError> {
        (**self).ask(question)
    }
}
