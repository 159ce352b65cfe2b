//! Groq HTTP client and wire types.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::ChatRequest;
use crate::error::{LlmError, Result};
use crate::message::Message;
use crate::tool::ToolDefinition;
use crate::usage::Usage;

use super::config::GroqConfig;

/// Groq chat-completions client.
#[derive(Debug, Clone)]
pub struct Groq {
    pub(super) config: Arc<GroqConfig>,
    pub(super) client: reqwest::Client,
}

impl Groq {
    /// Create a client from a configuration.
    pub fn new(config: GroqConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::auth("groq", "API key must not be empty").into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(LlmError::from)?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GroqConfig::from_env()?)
    }

    /// The configured default model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(super) fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    pub(super) fn build_request(&self, url: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(body)
    }

    pub(super) fn build_body(&self, request: &ChatRequest) -> Result<Value> {
        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model.clone()
        };

        let wire = GroqChatRequest {
            model,
            messages: request.messages.iter().map(convert_message).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            stop: request.stop.clone(),
            tools: request
                .tools
                .as_ref()
                .map(|tools| tools.iter().map(convert_tool).collect()),
            tool_choice: request.tool_choice.as_ref().map(|c| c.to_value()),
        };

        Ok(serde_json::to_value(wire)?)
    }

    pub(super) fn parse_error(&self, status: u16, body: &str) -> LlmError {
        if let Ok(parsed) = serde_json::from_str::<GroqErrorResponse>(body) {
            return match status {
                401 => LlmError::auth("groq", parsed.error.message),
                429 => LlmError::rate_limited("groq"),
                _ => match parsed.error.code {
                    Some(code) => LlmError::provider_code("groq", code, parsed.error.message),
                    None => LlmError::provider("groq", parsed.error.message),
                },
            };
        }
        LlmError::http_status(status, body)
    }
}

fn convert_message(message: &Message) -> GroqMessage {
    GroqMessage {
        role: message.role.as_str().to_string(),
        content: message.content.clone(),
        tool_calls: message.tool_calls.as_ref().map(|calls| {
            calls
                .iter()
                .map(|call| GroqToolCall {
                    id: call.id.clone(),
                    call_type: call.call_type.clone(),
                    function: GroqFunctionCall {
                        name: call.function.name.clone(),
                        arguments: call.function.arguments.clone(),
                    },
                })
                .collect()
        }),
        tool_call_id: message.tool_call_id.clone(),
    }
}

fn convert_tool(definition: &ToolDefinition) -> GroqTool {
    GroqTool {
        tool_type: "function".to_string(),
        function: GroqFunction {
            name: definition.name.clone(),
            description: definition.description.clone(),
            parameters: definition.parameters.clone(),
            strict: definition.strict,
        },
    }
}

#[derive(Debug, Serialize)]
pub(super) struct GroqChatRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<GroqTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct GroqMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<GroqToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct GroqTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: GroqFunction,
}

#[derive(Debug, Serialize)]
pub(super) struct GroqFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GroqToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: GroqFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GroqFunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<GroqChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqChoice {
    pub message: GroqResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqResponseMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<GroqToolCall>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqErrorResponse {
    pub error: GroqError,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}
