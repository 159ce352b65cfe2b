//! Chat message types shared across providers.
//!
//! These follow the OpenAI chat-completions wire shape so they can be
//! serialized directly into provider request bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// The role of a message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions that steer the model.
    System,
    /// Input from the user.
    User,
    /// Output from the model.
    Assistant,
    /// A tool execution result fed back to the model.
    Tool,
}

impl Role {
    /// The wire-format name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// The function invocation inside a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to invoke.
    pub name: String,
    /// Arguments as a JSON-encoded string, as providers emit them.
    pub arguments: String,
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned identifier, echoed back in the tool message.
    pub id: String,
    /// Call type, currently always `"function"`.
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function being invoked.
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a function tool call.
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// The name of the function being called.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// The raw argument payload as a JSON value.
    ///
    /// Providers send arguments as a JSON-encoded string. If the string
    /// is not valid JSON it is passed through as a string value so the
    /// tool still sees what the model produced.
    #[must_use]
    pub fn arguments_value(&self) -> Value {
        serde_json::from_str(&self.function.arguments)
            .unwrap_or_else(|_| Value::String(self.function.arguments.clone()))
    }

    /// Deserialize the arguments into a typed structure.
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.function.arguments)?)
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this message.
    pub role: Role,

    /// Text content. Absent on assistant messages that only carry tool
    /// calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool calls requested by the assistant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// For tool messages, the id of the call this result answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create an assistant message with text content.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create an assistant message carrying tool calls.
    #[must_use]
    pub fn assistant_with_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_calls: Some(tool_calls),
            tool_call_id: None,
        }
    }

    /// Create a tool result message answering a specific call.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// The text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Whether this message carries at least one tool call.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls.as_ref().is_some_and(|calls| !calls.is_empty())
    }
}

impl Default for Message {
    fn default() -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod role {
        use super::*;

        #[test]
        fn serializes_lowercase() {
            assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
            assert_eq!(serde_json::to_string(&Role::Tool).unwrap(), "\"tool\"");
        }

        #[test]
        fn as_str_matches_wire_format() {
            assert_eq!(Role::Assistant.as_str(), "assistant");
            assert_eq!(Role::User.as_str(), "user");
        }
    }

    mod tool_call {
        use super::*;

        #[test]
        fn function_constructor() {
            let call = ToolCall::function("call_1", "web_search", r#"{"query":"air quality"}"#);
            assert_eq!(call.id, "call_1");
            assert_eq!(call.call_type, "function");
            assert_eq!(call.name(), "web_search");
        }

        #[test]
        fn arguments_value_parses_json() {
            let call = ToolCall::function("call_1", "t", r#"{"query":"x"}"#);
            let value = call.arguments_value();
            assert_eq!(value["query"], "x");
        }

        #[test]
        fn arguments_value_falls_back_to_string() {
            let call = ToolCall::function("call_1", "t", "not json");
            assert_eq!(call.arguments_value(), Value::String("not json".to_string()));
        }

        #[test]
        fn parse_arguments_typed() {
            #[derive(serde::Deserialize)]
            struct Args {
                query: String,
            }

            let call = ToolCall::function("call_1", "t", r#"{"query":"smog"}"#);
            let args: Args = call.parse_arguments().unwrap();
            assert_eq!(args.query, "smog");
        }
    }

    mod message {
        use super::*;

        #[test]
        fn constructors_set_roles() {
            assert_eq!(Message::system("s").role, Role::System);
            assert_eq!(Message::user("u").role, Role::User);
            assert_eq!(Message::assistant("a").role, Role::Assistant);
            assert_eq!(Message::tool("id", "out").role, Role::Tool);
        }

        #[test]
        fn tool_message_carries_call_id() {
            let msg = Message::tool("call_9", "Rows: 4");
            assert_eq!(msg.tool_call_id.as_deref(), Some("call_9"));
            assert_eq!(msg.text(), Some("Rows: 4"));
        }

        #[test]
        fn has_tool_calls_requires_non_empty() {
            let empty = Message::assistant_with_tool_calls(None, vec![]);
            assert!(!empty.has_tool_calls());

            let call = ToolCall::function("c", "t", "{}");
            let with = Message::assistant_with_tool_calls(None, vec![call]);
            assert!(with.has_tool_calls());
        }

        #[test]
        fn serialization_skips_absent_fields() {
            let json = serde_json::to_string(&Message::user("hello")).unwrap();
            assert!(!json.contains("tool_calls"));
            assert!(!json.contains("tool_call_id"));
        }
    }
}
