//! LLM provider implementations.

pub mod groq;
pub mod mock;

pub use groq::{Groq, GroqConfig};
pub use mock::MockProvider;
