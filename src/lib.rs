//! # devhelper: ask questions about your project
//!
//! A command-line assistant that answers natural-language questions about a
//! local project. A chat model does the reasoning; it reaches the project only
//! through four sandboxed file tools.
//!
//! ## Architecture
//!
//! - **PathGuard**: every path the model sends is checked and kept inside the
//!   project root before the filesystem is touched
//! - **ConfirmationGate**: the operator approves each write and delete
//! - **FileTools**: list, read, write and delete, built on the two above
//! - **Agent**: the model-driven loop that decides which tools to call
//! - **Session**: the console loop that reads questions and prints answers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use devhelper::prelude::*;
//!
//! let root = ProjectRoot::new(".")?;
//! let tools = BuiltinTools::all(FileTools::new(root, ConsoleGate::stdio()));
//! let client = OpenAIClient::new(&ProviderConfig::openai("sk-..."))?;
//! let mut agent = ToolCallingAgent::new(client, tools);
//!
//! let answer = agent.ask("What does this project do?")?;
//! println!("Answer: {answer}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod agent;
pub mod config;
pub mod console;
pub mod error;
pub mod llm;
pub mod logging;
pub mod session;
pub mod tools;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::agent::{Agent, AgentConfig, ToolCallingAgent};
    pub use crate::config::DevHelperConfig;
    pub use crate::error::{DevHelperError, DevHelperErrorKind};
    pub use crate::llm::{ChatBackend, LLMError, OpenAIClient, ProviderConfig};
    pub use crate::session::run_session;
    pub use crate::tools::security::{
        ConfirmationGate, ConsoleGate, PathGuard, ProjectRoot, RelativePath,
    };
    pub use crate::tools::{BuiltinTools, FileTools, ToolError};
    pub use crate::types::InvocationId;
}
