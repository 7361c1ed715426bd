//! Read file built-in tool.

use crate::tools::definition::{parse_args, ToolDefinition, ToolExecutor, ToolParameter};
use crate::tools::{FileTools, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

/// Read file tool executor.
///
/// Returns the whole file as text, unchanged.
#[derive(Debug, Default, Clone)]
pub struct ReadFileTool;

#[derive(Debug, Deserialize)]
struct ReadFileArgs {
    filename: String,
}

impl ReadFileTool {
    /// Stable tool name.
    pub const NAME: &'static str = "read_file";

    /// Creates a new read file tool.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ToolExecutor for ReadFileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME,
            description: "Get the content of a file",
            parameters: vec![ToolParameter::required(
                "filename",
                "The file to read. \
                 The parameter is a single string relative to the project root.",
            )],
        }
    }

    fn execute(&self, tools: &FileTools, args: Value) -> Result<Value, ToolError> {
        let args: ReadFileArgs = parse_args(Self::NAME, args)?;
        let content = tools.read_file(&args.filename)?;

        Ok(json!({ "content": content }))
    }
}
