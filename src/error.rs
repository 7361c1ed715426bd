//! Top-level error type for devhelper.
//!
//! Tool failures never reach this level: they are reported back to the agent
//! as tool results. [`DevHelperError`] covers what can fail around the tools:
//! configuration, the model provider, the agent loop and the operator console.
//!
//! No external error crates are used here; the binary wraps these in `anyhow`
//! only at `main`.

use crate::llm::LLMError;
use std::fmt;
use std::io;

/// Errors from the devhelper session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevHelperError {
    /// The specific error that occurred
    pub kind: DevHelperErrorKind,
}

/// Specific devhelper error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevHelperErrorKind {
    /// Configuration is missing or invalid
    Configuration {
        /// The configuration field or file
        field: String,
        /// Why it was invalid
        reason: String,
    },
    /// The model provider failed
    Provider {
        /// The provider error, rendered
        reason: String,
    },
    /// The agent could not produce an answer
    Agent {
        /// What went wrong
        reason: String,
    },
    /// Reading from or writing to the operator console failed
    Console {
        /// The underlying I/O error
        reason: String,
    },
}

impl DevHelperError {
    /// Creates a new DevHelperError with the given kind.
    #[must_use]
    pub fn new(kind: DevHelperErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(DevHelperErrorKind::Configuration {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Creates a provider error.
    #[must_use]
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::new(DevHelperErrorKind::Provider {
            reason: reason.into(),
        })
    }

    /// Creates an agent error.
    #[must_use]
    pub fn agent(reason: impl Into<String>) -> Self {
        Self::new(DevHelperErrorKind::Agent {
            reason: reason.into(),
        })
    }

    /// Creates a console error.
    #[must_use]
    pub fn console(error: &io::Error) -> Self {
        Self::new(DevHelperErrorKind::Console {
            reason: error.to_string(),
        })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, DevHelperErrorKind::Configuration { .. })
    }

    /// Returns true if the operator console failed.
    #[must_use]
    pub fn is_console(&self) -> bool {
        matches!(self.kind, DevHelperErrorKind::Console { .. })
    }
}

impl fmt::Display for DevHelperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DevHelperErrorKind::Configuration { field, reason } => {
                write!(f, "configuration error for '{}': {}", field, reason)
            }
            DevHelperErrorKind::Provider { reason } => {
                write!(f, "model provider error: {}", reason)
            }
            DevHelperErrorKind::Agent { reason } => {
                write!(f, "agent failed to answer: {}", reason)
            }
            DevHelperErrorKind::Console { reason } => {
                write!(f, "console I/O failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for DevHelperError {}

impl From<LLMError> for DevHelperError {
    fn from(error: LLMError) -> Self {
        Self::provider(error.to_string())
    }
}
