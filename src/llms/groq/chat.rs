//! `ChatProvider` implementation for Groq.

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse, StopReason};
use crate::error::{LlmError, Result};
use crate::message::{Message, Role, ToolCall};

use super::client::{Groq, GroqChatResponse};

impl Groq {
    fn parse_response(&self, response: GroqChatResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::response_format("at least one choice", "empty choices"))?;

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("length") => StopReason::Length,
            Some("tool_calls") => StopReason::ToolCalls,
            Some("content_filter") => StopReason::ContentFilter,
            _ => StopReason::Stop,
        };

        let tool_calls = choice.message.tool_calls.map(|calls| {
            calls
                .into_iter()
                .map(|call| ToolCall::function(call.id, call.function.name, call.function.arguments))
                .collect()
        });

        let message = Message {
            role: Role::Assistant,
            content: choice.message.content,
            tool_calls,
            tool_call_id: None,
        };

        let mut parsed = ChatResponse::new(message)
            .with_stop_reason(stop_reason)
            .with_model(response.model);
        parsed.id = response.id;
        parsed.usage = response.usage;
        Ok(parsed)
    }
}

#[async_trait]
impl ChatProvider for Groq {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let body = self.build_body(request)?;
        let response = self
            .build_request(&self.chat_url(), &body)
            .send()
            .await
            .map_err(LlmError::from)?;

        let status = response.status();
        let text = response.text().await.map_err(LlmError::from)?;

        if !status.is_success() {
            return Err(self.parse_error(status.as_u16(), &text).into());
        }

        let parsed: GroqChatResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::response_format("chat completion JSON", format!("parse error: {e}"))
        })?;
        self.parse_response(parsed)
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }

    fn default_model(&self) -> &str {
        self.model()
    }
}
