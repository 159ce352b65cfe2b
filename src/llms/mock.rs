//! Scripted provider for tests and offline development.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::Result;

/// A provider that replays scripted responses in order, cycling when
/// the script runs out.
#[derive(Debug)]
pub struct MockProvider {
    model_id: String,
    responses: Vec<ChatResponse>,
    index: AtomicUsize,
}

impl MockProvider {
    /// Create a provider replaying plain-text responses.
    #[must_use]
    pub fn new(responses: Vec<String>) -> Self {
        Self::with_responses(responses.into_iter().map(ChatResponse::from_text).collect())
    }

    /// Create a provider replaying full responses, tool calls included.
    #[must_use]
    pub fn with_responses(responses: Vec<ChatResponse>) -> Self {
        Self {
            model_id: "mock-model".to_string(),
            responses,
            index: AtomicUsize::new(0),
        }
    }

    /// Set the model identifier reported by the provider.
    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse> {
        if self.responses.is_empty() {
            return Ok(ChatResponse::from_text("No response"));
        }
        let index = self.index.fetch_add(1, Ordering::SeqCst) % self.responses.len();
        Ok(self.responses[index].clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        &self.model_id
    }
}
