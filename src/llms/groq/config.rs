//! Groq provider configuration.

use crate::error::{LlmError, Result};

/// Default Groq API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "qwen/qwen3-32b";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Groq provider.
///
/// All values are passed explicitly; nothing is read at import time.
/// [`GroqConfig::from_env`] is the one place environment variables are
/// consulted, and only when the caller asks for it.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Model to use when a request leaves the model field empty.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl GroqConfig {
    /// Create a configuration with the given API key and defaults for
    /// everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build a configuration from environment variables.
    ///
    /// Reads `GROQ_API_KEY` (required), `GROQ_BASE_URL` and `GROQ_MODEL`
    /// (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| LlmError::auth("groq", "GROQ_API_KEY environment variable not set"))?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GROQ_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}
