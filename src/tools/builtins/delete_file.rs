//! Delete file built-in tool.

use crate::tools::definition::{parse_args, ToolDefinition, ToolExecutor, ToolParameter};
use crate::tools::{FileTools, ToolError};
use serde::Deserialize;
use serde_json::{json, Value};

/// Delete file tool executor. Asks the operator first.
#[derive(Debug, Default, Clone)]
pub struct DeleteFileTool;

#[derive(Debug, Deserialize)]
struct DeleteFileArgs {
    filename: String,
}

impl DeleteFileTool {
    /// Stable tool name.
    pub const NAME: &'static str = "delete_file";

    /// Creates a new delete file tool.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ToolExecutor for DeleteFileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME,
            description: "Remove file",
            parameters: vec![ToolParameter::required(
                "filename",
                "Single string relative to the project root.",
            )],
        }
    }

    fn execute(&self, tools: &FileTools, args: Value) -> Result<Value, ToolError> {
        let args: DeleteFileArgs = parse_args(Self::NAME, args)?;
        tools.delete_file(&args.filename)?;

        Ok(json!({ "success": true }))
    }

    fn is_mutating(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::security::{ProjectRoot, ScriptedGate};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn deletes_after_yes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.log"), "x").unwrap();
        let tools = FileTools::new(
            ProjectRoot::new(dir.path()).unwrap(),
            ScriptedGate::new(["yes"]),
        );

        let result = DeleteFileTool::new()
            .execute(&tools, json!({"filename": "old.log"}))
            .unwrap();
        assert_eq!(result["success"], true);
        assert!(!dir.path().join("old.log").exists());
    }

    #[test]
    fn keeps_file_after_no() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.log"), "x").unwrap();
        let tools = FileTools::new(
            ProjectRoot::new(dir.path()).unwrap(),
            ScriptedGate::new(["ye"]),
        );

        let err = DeleteFileTool::new()
            .execute(&tools, json!({"filename": "old.log"}))
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(dir.path().join("old.log").exists());
    }

    #[test]
    fn definition() {
        let tool = DeleteFileTool::new();
        assert_eq!(tool.definition().name, "delete_file");
        assert!(tool.is_mutating());
    }
}
