//! Chat request/response types and the provider abstraction.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::message::{Message, ToolCall};
use crate::tool::ToolDefinition;
use crate::usage::Usage;

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of the response.
    #[default]
    Stop,
    /// Hit the token limit.
    Length,
    /// The model wants tools executed.
    ToolCalls,
    /// The provider filtered the content.
    ContentFilter,
}

impl StopReason {
    /// Whether the response ran to a natural end.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Stop)
    }

    /// Whether the response was cut off by the token limit.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Length)
    }
}

/// How the model should decide about calling tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ToolChoice {
    /// The model decides whether to call tools.
    #[default]
    Auto,
    /// The model must call at least one tool.
    Required,
    /// The model must not call tools.
    None,
    /// The model must call this specific function.
    Function(String),
}

impl ToolChoice {
    /// Wire-format value for the `tool_choice` request field.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Auto => Value::String("auto".to_string()),
            Self::Required => Value::String("required".to_string()),
            Self::None => Value::String("none".to_string()),
            Self::Function(name) => serde_json::json!({
                "type": "function",
                "function": { "name": name }
            }),
        }
    }
}

impl From<&str> for ToolChoice {
    fn from(s: &str) -> Self {
        match s {
            "required" => Self::Required,
            "none" => Self::None,
            "auto" => Self::Auto,
            name => Self::Function(name.to_string()),
        }
    }
}

/// A chat completion request.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// Model identifier. Empty means use the provider's default.
    pub model: String,
    /// Conversation so far, oldest first.
    pub messages: Vec<Message>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,
    /// Stop sequences.
    pub stop: Option<Vec<String>>,
    /// Tools the model may call.
    pub tools: Option<Vec<ToolDefinition>>,
    /// Tool-choice policy.
    pub tool_choice: Option<ToolChoice>,
}

impl ChatRequest {
    /// Create a request for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Append a message.
    #[must_use]
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Replace the full message list.
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the token limit.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the nucleus sampling parameter.
    #[must_use]
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set stop sequences.
    #[must_use]
    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Set the tools the model may call.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the tool-choice policy.
    #[must_use]
    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }
}

/// A chat completion response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant message produced by the model.
    pub message: Message,
    /// Why generation stopped.
    pub stop_reason: StopReason,
    /// Token accounting, when the provider reports it.
    pub usage: Option<Usage>,
    /// Model that produced the response.
    pub model: String,
    /// Provider-assigned response id.
    pub id: String,
    /// The raw provider payload, for debugging.
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl ChatResponse {
    /// Create a response around an assistant message.
    #[must_use]
    pub fn new(message: Message) -> Self {
        Self {
            message,
            ..Default::default()
        }
    }

    /// Create a plain-text response, for scripted providers and tests.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(Message::assistant(text))
    }

    /// Set the stop reason.
    #[must_use]
    pub fn with_stop_reason(mut self, stop_reason: StopReason) -> Self {
        self.stop_reason = stop_reason;
        self
    }

    /// Attach usage statistics.
    #[must_use]
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Attach the raw provider payload.
    #[must_use]
    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// The text content of the response, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message.text()
    }

    /// Tool calls requested by the model.
    #[must_use]
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.message.tool_calls.as_deref().unwrap_or_default()
    }

    /// Whether the model requested any tool calls.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.message.has_tool_calls()
    }

    /// Whether generation ran to a natural end.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stop_reason.is_complete()
    }

    /// Whether generation was cut off by the token limit.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.stop_reason.is_truncated()
    }
}

/// A chat completion backend.
///
/// Implemented by [`Groq`](crate::llms::Groq) over HTTP and by
/// [`MockProvider`](crate::llms::MockProvider) for tests.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat request and wait for the full response.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Short provider name, used in error attribution and logs.
    fn provider_name(&self) -> &'static str;

    /// Model used when a request leaves the model field empty.
    fn default_model(&self) -> &str;

    /// Whether the provider supports function-calling tools.
    fn supports_tools(&self) -> bool {
        true
    }
}

/// A shareable provider handle.
pub type SharedChatProvider = Arc<dyn ChatProvider>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod stop_reason {
        use super::*;

        #[test]
        fn deserializes_snake_case() {
            let reason: StopReason = serde_json::from_str("\"tool_calls\"").unwrap();
            assert_eq!(reason, StopReason::ToolCalls);
        }

        #[test]
        fn completeness_flags() {
            assert!(StopReason::Stop.is_complete());
            assert!(!StopReason::Length.is_complete());
            assert!(StopReason::Length.is_truncated());
        }
    }

    mod tool_choice {
        use super::*;

        #[test]
        fn to_value_strings() {
            assert_eq!(ToolChoice::Auto.to_value(), "auto");
            assert_eq!(ToolChoice::Required.to_value(), "required");
            assert_eq!(ToolChoice::None.to_value(), "none");
        }

        #[test]
        fn to_value_function() {
            let value = ToolChoice::Function("web_search".to_string()).to_value();
            assert_eq!(value["type"], "function");
            assert_eq!(value["function"]["name"], "web_search");
        }

        #[test]
        fn from_str_keywords_and_names() {
            assert_eq!(ToolChoice::from("auto"), ToolChoice::Auto);
            assert_eq!(ToolChoice::from("required"), ToolChoice::Required);
            assert_eq!(
                ToolChoice::from("web_search"),
                ToolChoice::Function("web_search".to_string())
            );
        }
    }

    mod request {
        use super::*;

        #[test]
        fn builders_compose() {
            let request = ChatRequest::new("qwen/qwen3-32b")
                .message(Message::system("You are helpful."))
                .message(Message::user("hello"))
                .with_temperature(0.2)
                .with_max_tokens(512)
                .with_tool_choice(ToolChoice::Auto);

            assert_eq!(request.model, "qwen/qwen3-32b");
            assert_eq!(request.messages.len(), 2);
            assert_eq!(request.temperature, Some(0.2));
            assert_eq!(request.max_tokens, Some(512));
            assert_eq!(request.tool_choice, Some(ToolChoice::Auto));
        }
    }

    mod response {
        use super::*;

        #[test]
        fn from_text_is_complete() {
            let response = ChatResponse::from_text("done");
            assert_eq!(response.text(), Some("done"));
            assert!(response.is_complete());
            assert!(!response.has_tool_calls());
        }

        #[test]
        fn tool_calls_accessor() {
            let call = ToolCall::function("c1", "web_search", "{}");
            let response = ChatResponse::new(Message::assistant_with_tool_calls(
                None,
                vec![call],
            ))
            .with_stop_reason(StopReason::ToolCalls);

            assert!(response.has_tool_calls());
            assert_eq!(response.tool_calls().len(), 1);
            assert_eq!(response.tool_calls()[0].name(), "web_search");
        }
    }
}
