//! Sandboxed project tools.
//!
//! Everything the agent can do to the project goes through this module:
//!
//! - **Security**: [`security::PathGuard`] keeps every path inside the
//!   project root, [`security::ConfirmationGate`] asks the operator before
//!   anything changes
//! - **File tools**: [`FileTools`] implements list, read, write and delete
//! - **Built-ins**: [`builtins::BuiltinTools`] exposes those operations to the
//!   agent by name
//!
//! ## Architecture
//!
//! ```text
//! agent tool call (name, JSON args)
//!          |
//!          v
//! BuiltinTools::call --> ToolExecutor::execute --> FileTools
//!                                                    |
//!                                   PathGuard::resolve, then (mutating only)
//!                                   ConfirmationGate::confirm, then std::fs
//! ```

pub mod builtins;
pub mod definition;
pub mod error;
mod file_tools;
pub mod security;

pub use builtins::BuiltinTools;
pub use definition::{BoxedToolExecutor, ParameterKind, ToolDefinition, ToolExecutor, ToolParameter};
pub use error::{ToolError, ToolErrorKind};
pub use file_tools::FileTools;
