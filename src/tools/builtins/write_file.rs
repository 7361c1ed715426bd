//! Write file built-in tool.
//!
//! Creates or overwrites a file after the operator confirms, creating parent
//! directories if needed.

use crate::tools::definition::{parse_args, ToolDefinition, ToolExecutor, ToolParameter};
use crate::tools::{FileTools, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

/// Write file tool executor.
#[derive(Debug, Default, Clone)]
pub struct WriteFileTool;

/// Arguments for the write_file tool.
#[derive(Debug, Deserialize)]
struct WriteFileArgs {
    /// File relative to the project root
    filename: String,
    /// Full new content of the file
    content: String,
}

impl WriteFileTool {
    /// Stable tool name.
    pub const NAME: &'static str = "write_file";

    /// Creates a new write file tool.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ToolExecutor for WriteFileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME,
            description: "Create or update the content of a file. \
                The developer is asked to confirm before anything is written.",
            parameters: vec![
                ToolParameter::required(
                    "filename",
                    "Single string relative to the project root.",
                ),
                ToolParameter::required("content", "The content of the file."),
            ],
        }
    }

    fn execute(&self, tools: &FileTools, args: Value) -> Result<Value, ToolError> {
        let args: WriteFileArgs = parse_args(Self::NAME, args)?;
        tools.write_file(&args.filename, &args.content)?;

        Ok(json!({
            "success": true,
            "bytes_written": args.content.len()
        }))
    }

    fn is_mutating(&self) -> bool {
        true
    }
}
