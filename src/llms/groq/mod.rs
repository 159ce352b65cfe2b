//! Groq provider over the OpenAI-compatible chat-completions API.

mod chat;
mod client;
mod config;

pub use client::Groq;
pub use config::GroqConfig;
