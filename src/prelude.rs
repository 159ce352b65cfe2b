//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use civitas::prelude::*;
//! ```

pub use crate::agent::{Agent, RunConfig, RunResult, Runner};
pub use crate::analysis::{dispatch, summarize};
pub use crate::chat::{
    ChatProvider, ChatRequest, ChatResponse, SharedChatProvider, StopReason, ToolChoice,
};
pub use crate::error::{AnalysisError, Error, LlmError, Result, ToolError};
pub use crate::llms::{Groq, GroqConfig, MockProvider};
pub use crate::message::{Message, Role, ToolCall};
pub use crate::taskforce::{SectionOutputs, TaskForce, TaskForceReport};
pub use crate::tool::{BoxedTool, DynTool, Tool, ToolDefinition, ToolResult};
pub use crate::tools::{AirQualityCsvTool, HackerNewsTool, WebSearchTool};
pub use crate::usage::Usage;
