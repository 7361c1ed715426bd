//! Tool definitions and the executor trait.
//!
//! A [`ToolDefinition`] is what the agent sees: a stable name, a purpose
//! string and a typed parameter list. [`ToolExecutor`] is the callable side.

use crate::tools::error::ToolError;
use crate::tools::file_tools::FileTools;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt::Debug;

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// A JSON string
    String,
}

impl ParameterKind {
    fn as_json_type(self) -> &'static str {
        match self {
            Self::String => "string",
        }
    }
}

/// One parameter of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    /// Parameter name as it appears in the call arguments
    pub name: &'static str,
    /// JSON type
    pub kind: ParameterKind,
    /// What the agent should put here
    pub description: &'static str,
    /// Whether the call is invalid without it
    pub required: bool,
}

impl ToolParameter {
    /// A required string parameter.
    #[must_use]
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::String,
            description,
            required: true,
        }
    }

    /// An optional string parameter.
    #[must_use]
    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::String,
            description,
            required: false,
        }
    }
}

/// The contract a tool exposes to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    /// Stable tool name
    pub name: &'static str,
    /// Human-readable purpose
    pub description: &'static str,
    /// Typed parameters, in declaration order
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    /// Renders the parameter list as a JSON-schema object, the form
    /// function-calling providers expect.
    #[must_use]
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            properties.insert(
                param.name.to_string(),
                json!({
                    "type": param.kind.as_json_type(),
                    "description": param.description,
                }),
            );
        }

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// A tool the agent can call by name.
pub trait ToolExecutor: Debug {
    /// Returns the definition shown to the agent.
    fn definition(&self) -> ToolDefinition;

    /// Runs the tool against the project.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` if `args` does not match the parameters, or
    /// whatever the underlying [`FileTools`] operation fails with.
    fn execute(&self, tools: &FileTools, args: Value) -> Result<Value, ToolError>;

    /// Whether the tool changes the filesystem and therefore asks the operator.
    fn is_mutating(&self) -> bool {
        false
    }
}

/// A boxed tool executor for dynamic dispatch.
pub type BoxedToolExecutor = Box<dyn ToolExecutor>;

/// Deserializes tool arguments, reporting failures as `InvalidArguments`.
///
/// Some models send `null` instead of `{}` for a call without arguments;
/// that is treated as an empty object.
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(
    tool_name: &str,
    args: Value,
) -> Result<T, ToolError> {
    let args = if args.is_null() {
        Value::Object(Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ToolError::invalid_arguments(tool_name, e.to_string()))
}
