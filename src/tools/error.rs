//! Tool error types.
//!
//! Every failure a file tool can produce, from path rejection through operator
//! refusal to the underlying filesystem error. Failures are scoped to a single
//! invocation; they are reported back to the agent and never end the session.

use crate::tools::security::PathGuardError;
use crate::types::InvocationId;
use std::fmt;
use std::io;
use std::path::Path;

/// Errors that can occur while running a tool.
///
/// The kind is boxed to keep `Result<_, ToolError>` small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    /// The invocation that failed, once known
    pub invocation_id: Option<InvocationId>,
    kind: Box<ToolErrorKind>,
}

/// Specific tool error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// The path was rejected before touching the filesystem
    InvalidPath {
        /// Why the path was rejected
        reason: String,
    },
    /// The operator declined a mutating action
    UserCancelled {
        /// The action that was declined
        action: String,
    },
    /// The target does not exist
    NotFound {
        /// The path relative to the project root
        path: String,
    },
    /// The target exists but is not a directory
    NotADirectory {
        /// The path relative to the project root
        path: String,
    },
    /// The target exists but cannot be read as text
    NotReadable {
        /// The path relative to the project root
        path: String,
        /// Why reading failed
        reason: String,
    },
    /// Any other I/O failure
    Io {
        /// The path relative to the project root
        path: String,
        /// The underlying I/O error
        reason: String,
    },
    /// The agent sent arguments that do not match the tool's parameters
    InvalidArguments {
        /// The tool that was called
        tool_name: String,
        /// What was wrong
        reason: String,
    },
    /// The agent asked for a tool that is not registered
    UnknownTool {
        /// The requested tool name
        tool_name: String,
    },
}

impl ToolError {
    /// Creates a new ToolError with the given kind.
    #[must_use]
    pub fn new(kind: ToolErrorKind) -> Self {
        Self {
            invocation_id: None,
            kind: Box::new(kind),
        }
    }

    /// Attaches the invocation id.
    #[must_use]
    pub fn with_invocation(mut self, invocation_id: InvocationId) -> Self {
        self.invocation_id = Some(invocation_id);
        self
    }

    /// Returns a reference to the error kind.
    #[must_use]
    pub fn kind(&self) -> &ToolErrorKind {
        &self.kind
    }

    /// Creates an invalid path error.
    #[must_use]
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidPath {
            reason: reason.into(),
        })
    }

    /// Creates a user cancelled error.
    #[must_use]
    pub fn cancelled(action: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::UserCancelled {
            action: action.into(),
        })
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound { path: path.into() })
    }

    /// Creates a not a directory error.
    #[must_use]
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotADirectory { path: path.into() })
    }

    /// Creates a not readable error.
    #[must_use]
    pub fn not_readable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotReadable {
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Io {
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid arguments error.
    #[must_use]
    pub fn invalid_arguments(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments {
            tool_name: tool_name.into(),
            reason: reason.into(),
        })
    }

    /// Creates an unknown tool error.
    #[must_use]
    pub fn unknown_tool(tool_name: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::UnknownTool {
            tool_name: tool_name.into(),
        })
    }

    /// Maps an `io::Error` raised for `path`, turning `NotFound` into
    /// [`ToolErrorKind::NotFound`] and everything else into [`ToolErrorKind::Io`].
    #[must_use]
    pub fn from_io(path: impl AsRef<Path>, error: &io::Error) -> Self {
        let path = path.as_ref().display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => Self::not_found(path),
            _ => Self::io(path, error.to_string()),
        }
    }

    /// Stable snake_case code reported to the agent alongside the message.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.kind.as_ref() {
            ToolErrorKind::InvalidPath { .. } => "invalid_path",
            ToolErrorKind::UserCancelled { .. } => "user_cancelled",
            ToolErrorKind::NotFound { .. } => "not_found",
            ToolErrorKind::NotADirectory { .. } => "not_a_directory",
            ToolErrorKind::NotReadable { .. } => "not_readable",
            ToolErrorKind::Io { .. } => "io_error",
            ToolErrorKind::InvalidArguments { .. } => "invalid_arguments",
            ToolErrorKind::UnknownTool { .. } => "unknown_tool",
        }
    }

    /// Returns true if the operator declined the action.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(*self.kind, ToolErrorKind::UserCancelled { .. })
    }

    /// Returns true if the path was rejected.
    #[must_use]
    pub fn is_invalid_path(&self) -> bool {
        matches!(*self.kind, ToolErrorKind::InvalidPath { .. })
    }

    /// Returns true if the target does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(*self.kind, ToolErrorKind::NotFound { .. })
    }
}

impl From<PathGuardError> for ToolError {
    fn from(error: PathGuardError) -> Self {
        Self::invalid_path(error.to_string())
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref id) = self.invocation_id {
            write!(f, "[{}] ", id)?;
        }

        match self.kind.as_ref() {
            ToolErrorKind::InvalidPath { reason } => write!(f, "invalid path: {}", reason),
            ToolErrorKind::UserCancelled { action } => {
                write!(f, "operation cancelled by the user: {}", action)
            }
            ToolErrorKind::NotFound { path } => {
                write!(f, "'{}' does not exist; list the directory to find valid names", path)
            }
            ToolErrorKind::NotADirectory { path } => {
                write!(f, "'{}' is not a directory", path)
            }
            ToolErrorKind::NotReadable { path, reason } => {
                write!(f, "'{}' cannot be read as text: {}", path, reason)
            }
            ToolErrorKind::Io { path, reason } => {
                write!(f, "I/O error on '{}': {}", path, reason)
            }
            ToolErrorKind::InvalidArguments { tool_name, reason } => write!(
                f,
                "tool '{}' received invalid arguments: {}; check the parameter list",
                tool_name, reason
            ),
            ToolErrorKind::UnknownTool { tool_name } => {
                write!(f, "tool '{}' is not available", tool_name)
            }
        }
    }
}

impl std::error::Error for ToolError {}
