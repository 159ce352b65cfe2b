//! Tool abstraction for function calling.
//!
//! Tools are typed on the implementation side ([`Tool`]) and erased for
//! the agent loop ([`DynTool`], [`BoxedTool`]), which only sees JSON in
//! and JSON out.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::ToolError;

/// Result type for tool execution.
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// A tool definition sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// What the tool does, shown to the model.
    pub description: String,
    /// JSON schema for the arguments.
    pub parameters: Value,
    /// Whether the provider should enforce the schema strictly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl ToolDefinition {
    /// Create a tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            strict: None,
        }
    }

    /// Create a definition with strict schema enforcement.
    pub fn new_strict(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self::new(name, description, parameters).with_strict(true)
    }

    /// Set strict schema enforcement.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Whether strict enforcement is enabled.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}

// Serialized in the OpenAI function-tool envelope:
// {"type": "function", "function": {"name": ..., "description": ..., "parameters": ...}}
impl Serialize for ToolDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Function<'a> {
            name: &'a str,
            description: &'a str,
            parameters: &'a Value,
            #[serde(skip_serializing_if = "Option::is_none")]
            strict: Option<bool>,
        }

        let mut state = serializer.serialize_struct("ToolDefinition", 2)?;
        state.serialize_field("type", "function")?;
        state.serialize_field(
            "function",
            &Function {
                name: &self.name,
                description: &self.description,
                parameters: &self.parameters,
                strict: self.strict,
            },
        )?;
        state.end()
    }
}

/// A typed tool the model can call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name.
    const NAME: &'static str;

    /// Typed arguments, deserialized from the model's JSON.
    type Args: DeserializeOwned + Send;
    /// Typed output, serialized back to the model.
    type Output: Serialize;
    /// Execution error type.
    type Error: Into<ToolError>;

    /// The tool's name. Defaults to [`Self::NAME`].
    fn name(&self) -> String {
        Self::NAME.to_string()
    }

    /// What the tool does, shown to the model.
    fn description(&self) -> String;

    /// JSON schema for the arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool.
    async fn call(&self, args: Self::Args) -> std::result::Result<Self::Output, Self::Error>;

    /// Build the definition sent to the model.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.parameters_schema())
    }

    /// Execute from a raw JSON argument payload.
    ///
    /// Handles the case where the model double-encodes the arguments as
    /// a JSON string.
    async fn call_json(&self, args: Value) -> ToolResult<Value> {
        let args = match args {
            Value::String(raw) => serde_json::from_str(&raw)
                .map_err(|e| ToolError::invalid_args(format!("invalid arguments: {e}")))?,
            other => other,
        };
        let args: Self::Args = serde_json::from_value(args)
            .map_err(|e| ToolError::invalid_args(format!("invalid arguments: {e}")))?;
        let output = self.call(args).await.map_err(Into::into)?;
        serde_json::to_value(output)
            .map_err(|e| ToolError::execution(format!("failed to serialize output: {e}")))
    }
}

/// Object-safe tool interface for the agent loop.
#[async_trait]
pub trait DynTool: Send + Sync {
    /// The tool's name.
    fn name(&self) -> String;

    /// The definition sent to the model.
    fn definition(&self) -> ToolDefinition;

    /// Execute from a raw JSON argument payload.
    async fn call_json(&self, args: Value) -> ToolResult<Value>;
}

#[async_trait]
impl<T: Tool> DynTool for T {
    fn name(&self) -> String {
        Tool::name(self)
    }

    fn definition(&self) -> ToolDefinition {
        Tool::definition(self)
    }

    async fn call_json(&self, args: Value) -> ToolResult<Value> {
        Tool::call_json(self, args).await
    }
}

/// A boxed, type-erased tool.
pub type BoxedTool = Box<dyn DynTool>;
