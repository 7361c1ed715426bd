//! List files built-in tool.
//!
//! Lists the immediate children of a project directory.

use crate::tools::definition::{parse_args, ToolDefinition, ToolExecutor, ToolParameter};
use crate::tools::{FileTools, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

/// List files tool executor.
#[derive(Debug, Default, Clone)]
pub struct ListFilesTool;

/// Arguments for the list_files tool.
#[derive(Debug, Deserialize)]
struct ListFilesArgs {
    /// Directory relative to the project root; root when absent
    #[serde(default)]
    directory: Option<String>,
}

impl ListFilesTool {
    /// Stable tool name.
    pub const NAME: &'static str = "list_files";

    /// Creates a new list files tool.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ToolExecutor for ListFilesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME,
            description: "Get the files in a directory. \
                Returns the entries directly inside this directory (one level, not recursive); \
                subdirectories appear as entries and can be listed in turn. \
                Returns the entries of the project root by default.",
            parameters: vec![ToolParameter::optional(
                "directory",
                "The name of the directory relative to the root of the project. \
                 Is a simple string. Use '/' to get the root directory.",
            )],
        }
    }

    fn execute(&self, tools: &FileTools, args: Value) -> Result<Value, ToolError> {
        let args: ListFilesArgs = parse_args(Self::NAME, args)?;
        let files = tools.list_files(args.directory.as_deref())?;

        Ok(json!({
            "files": files,
            "count": files.len()
        }))
    }
}
