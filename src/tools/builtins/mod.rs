//! Built-in project tools.
//!
//! The four tools the agent can call against the project tree:
//!
//! - **list_files**: entries directly inside a directory
//! - **read_file**: whole file as text
//! - **write_file**: create or overwrite a file (asks the operator)
//! - **delete_file**: remove a file (asks the operator)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use devhelper::tools::builtins::BuiltinTools;
//! use devhelper::tools::security::{AlwaysRefuse, ProjectRoot};
//! use devhelper::tools::FileTools;
//! use serde_json::json;
//!
//! let root = ProjectRoot::new(".")?;
//! let tools = BuiltinTools::all(FileTools::new(root, AlwaysRefuse));
//! let listing = tools.call("list_files", json!({}))?;
//! println!("{listing}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod delete_file;
mod list_files;
mod read_file;
mod write_file;

pub use delete_file::DeleteFileTool;
pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;
pub use write_file::WriteFileTool;

use crate::tools::definition::{BoxedToolExecutor, ToolDefinition};
use crate::tools::{FileTools, ToolError};
use crate::types::InvocationId;
use serde_json::Value;
use tracing::{info, info_span, warn};

/// Registry of built-in tools bound to one project.
///
/// Tools keep their registration order, which is the order the agent sees
/// them in.
#[derive(Debug)]
pub struct BuiltinTools {
    files: FileTools,
    executors: Vec<BoxedToolExecutor>,
}

impl BuiltinTools {
    /// Creates a registry with all built-in tools.
    #[must_use]
    pub fn all(files: FileTools) -> Self {
        Self {
            files,
            executors: Self::available()
                .into_iter()
                .filter_map(Self::executor_for)
                .collect(),
        }
    }

    /// Creates a registry with only the specified tools, in the given order.
    ///
    /// Repeated names are registered once.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTool` for a name that is not a built-in tool.
    pub fn select<S: AsRef<str>>(files: FileTools, tools: &[S]) -> Result<Self, ToolError> {
        let mut executors: Vec<BoxedToolExecutor> = Vec::with_capacity(tools.len());
        for name in tools.iter().map(AsRef::as_ref) {
            if executors.iter().any(|e| e.definition().name == name) {
                continue;
            }
            let executor = Self::executor_for(name).ok_or_else(|| ToolError::unknown_tool(name))?;
            executors.push(executor);
        }

        Ok(Self { files, executors })
    }

    /// Drops every tool that changes the project, keeping the order of the rest.
    #[must_use]
    pub fn without_mutating(mut self) -> Self {
        self.executors.retain(|e| !e.is_mutating());
        self
    }

    /// Lists all built-in tool names.
    #[must_use]
    pub fn available() -> Vec<&'static str> {
        vec![
            ListFilesTool::NAME,
            ReadFileTool::NAME,
            WriteFileTool::NAME,
            DeleteFileTool::NAME,
        ]
    }

    fn executor_for(name: &str) -> Option<BoxedToolExecutor> {
        let executor: BoxedToolExecutor = match name {
            ListFilesTool::NAME => Box::new(ListFilesTool::new()),
            ReadFileTool::NAME => Box::new(ReadFileTool::new()),
            WriteFileTool::NAME => Box::new(WriteFileTool::new()),
            DeleteFileTool::NAME => Box::new(DeleteFileTool::new()),
            _ => return None,
        };
        Some(executor)
    }

    /// Returns the definitions of the registered tools in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.executors.iter().map(|e| e.definition()).collect()
    }

    /// Returns true if a tool with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executors.len()
    }

    /// Returns true if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }

    /// Calls a tool by name.
    ///
    /// Every call gets a fresh [`InvocationId`]; it is attached to the log
    /// span and to any error returned.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTool` if no tool with this name is registered,
    /// otherwise whatever the tool fails with.
    pub fn call(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let invocation_id = InvocationId::new();
        let span = info_span!("tool", tool = name, invocation = %invocation_id);
        let _entered = span.enter();

        let result = match self.find(name) {
            Some(executor) => executor.execute(&self.files, args),
            None => Err(ToolError::unknown_tool(name)),
        };

        match result {
            Ok(value) => {
                info!("tool call completed");
                Ok(value)
            }
            Err(e) if e.is_cancelled() => {
                info!("tool call cancelled by operator");
                Err(e.with_invocation(invocation_id))
            }
            Err(e) => {
                warn!(error = %e, code = e.code(), "tool call failed");
                Err(e.with_invocation(invocation_id))
            }
        }
    }

    fn find(&self, name: &str) -> Option<&BoxedToolExecutor> {
        self.executors.iter().find(|e| e.definition().name == name)
    }
}
