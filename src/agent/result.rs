//! Run options and run outcome types.

use serde_json::Value;

use crate::chat::ChatResponse;
use crate::message::ToolCall;
use crate::usage::Usage;

/// Per-run options overriding the agent's defaults.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Override the agent's step limit.
    pub max_steps: Option<usize>,
    /// Sampling temperature for every request in the run.
    pub temperature: Option<f32>,
    /// Token limit for every request in the run.
    pub max_tokens: Option<u32>,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone)]
pub struct ToolCallRequest {
    /// Provider-assigned call id.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// Parsed argument payload.
    pub arguments: Value,
}

impl From<&ToolCall> for ToolCallRequest {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            name: call.name().to_string(),
            arguments: call.arguments_value(),
        }
    }
}

/// What the model asked for in a step.
#[derive(Debug, Clone)]
pub enum NextStep {
    /// The model produced its final answer.
    FinalOutput {
        /// The answer text.
        output: String,
    },
    /// The model wants tools executed before continuing.
    ToolCalls {
        /// Requested invocations, in request order.
        calls: Vec<ToolCallRequest>,
    },
}

/// Record of one executed tool call.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Provider-assigned call id.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// Argument payload the tool was called with.
    pub arguments: Value,
    /// Text fed back to the model.
    pub result: String,
    /// Whether the tool executed without error.
    pub success: bool,
}

/// One step of a run: the model response and any tool executions.
#[derive(Debug, Clone)]
pub struct StepInfo {
    /// 1-based step number.
    pub step: usize,
    /// The model response for this step.
    pub response: ChatResponse,
    /// Tool calls executed in this step, in request order.
    pub tool_calls: Vec<ToolCallRecord>,
}

/// The outcome of a completed agent run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Final answer text.
    pub output: String,
    /// Accumulated token usage across all steps.
    pub usage: Usage,
    /// Number of steps taken.
    pub steps: usize,
    /// Full step-by-step history.
    pub step_history: Vec<StepInfo>,
    /// Name of the agent that produced this result.
    pub agent_name: String,
}
