//! Runner — the agent execution engine.
//!
//! The [`Runner`] drives an [`Agent`] through its reasoning loop:
//!
//! 1. Build messages from instructions + conversation history
//! 2. Call the LLM with available tools
//! 3. Parse the response into a [`NextStep`]
//! 4. Execute tool calls, one at a time, in request order
//! 5. Append results and loop back to step 2
//!
//! The loop terminates when the LLM produces a final text output, an error
//! occurs, or the maximum step count is exceeded. Tool failures do not end
//! the run; the error text is fed back to the model instead.

use std::future::Future;
use std::pin::Pin;

use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::chat::{ChatRequest, ChatResponse, ToolChoice};
use crate::error::{Error, Result, ToolError};
use crate::message::Message;
use crate::tool::{BoxedTool, ToolDefinition};
use crate::usage::Usage;

use super::config::Agent;
use super::result::{NextStep, RunConfig, RunResult, StepInfo, ToolCallRecord, ToolCallRequest};

/// Stateless execution engine that drives an [`Agent`] through its
/// reasoning loop.
///
/// `Runner` owns no state, so it is safe to call [`Runner::run`] for
/// different agents or the same agent with different inputs.
#[derive(Debug, Clone, Copy)]
pub struct Runner;

impl Runner {
    /// Execute an agent run to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Agent`] if no provider is configured on the agent,
    /// [`Error::MaxSteps`] if the step limit is exceeded, or propagates
    /// LLM errors encountered during execution.
    pub fn run<'a>(
        agent: &'a Agent,
        input: impl Into<String>,
        config: &'a RunConfig,
    ) -> Pin<Box<dyn Future<Output = Result<RunResult>> + Send + 'a>> {
        let input = input.into();
        let span = info_span!(
            "agent",
            agent.name = %agent.name,
            agent.model = %agent.model,
            agent.max_steps = agent.max_steps,
            agent.result_steps = tracing::field::Empty,
            error = tracing::field::Empty,
        );
        Box::pin(Self::run_inner(agent, input, config).instrument(span))
    }

    async fn run_inner(agent: &Agent, input: String, config: &RunConfig) -> Result<RunResult> {
        let provider = agent.provider.as_deref().ok_or_else(|| {
            Error::agent(format!(
                "Agent '{}' has no provider configured. Call .provider() before running.",
                agent.name
            ))
        })?;

        let max_steps = config.max_steps.unwrap_or(agent.max_steps);

        let mut messages = Vec::new();
        if !agent.instructions.is_empty() {
            messages.push(Message::system(&agent.instructions));
        }
        messages.push(Message::user(input));

        let definitions: Vec<ToolDefinition> =
            agent.tools.iter().map(|tool| tool.definition()).collect();

        let mut step_history: Vec<StepInfo> = Vec::new();
        let mut cumulative_usage = Usage::zero();

        for step in 1..=max_steps {
            debug!(agent = %agent.name, step, "Starting step");

            let request = Self::build_request(agent, &messages, &definitions, config);

            let response = provider.chat(&request).await.map_err(|e| {
                error!(error = %e, agent = %agent.name, step, "LLM call failed");
                tracing::Span::current().record("error", tracing::field::display(&e));
                e
            })?;

            if let Some(usage) = response.usage {
                cumulative_usage += usage;
            }

            match Self::classify_response(&response) {
                NextStep::FinalOutput { output } => {
                    messages.push(response.message.clone());
                    step_history.push(StepInfo {
                        step,
                        response,
                        tool_calls: Vec::new(),
                    });

                    tracing::Span::current().record("agent.result_steps", step);
                    info!(
                        agent = %agent.name,
                        steps = step,
                        input_tokens = cumulative_usage.input_tokens,
                        output_tokens = cumulative_usage.output_tokens,
                        "Agent run completed",
                    );

                    return Ok(RunResult {
                        output,
                        usage: cumulative_usage,
                        steps: step,
                        step_history,
                        agent_name: agent.name.clone(),
                    });
                }

                NextStep::ToolCalls { calls } => {
                    messages.push(response.message.clone());

                    // One at a time, in request order.
                    let mut records = Vec::with_capacity(calls.len());
                    for call in &calls {
                        let record = Self::execute_single_tool(call, &agent.tools).await;
                        messages.push(Message::tool(&record.id, &record.result));
                        records.push(record);
                    }

                    step_history.push(StepInfo {
                        step,
                        response,
                        tool_calls: records,
                    });
                }
            }
        }

        let err = Error::max_steps(max_steps);
        error!(error = %err, agent = %agent.name, max_steps, "Max steps exceeded");
        tracing::Span::current().record("error", tracing::field::display(&err));
        Err(err)
    }

    /// Build a [`ChatRequest`] for the current step.
    fn build_request(
        agent: &Agent,
        messages: &[Message],
        definitions: &[ToolDefinition],
        config: &RunConfig,
    ) -> ChatRequest {
        let mut request = ChatRequest::new(&agent.model).with_messages(messages.to_vec());
        if !definitions.is_empty() {
            request = request
                .with_tools(definitions.to_vec())
                .with_tool_choice(ToolChoice::Auto);
        }
        if let Some(temperature) = config.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request
    }

    /// Classify an LLM response into a [`NextStep`].
    fn classify_response(response: &ChatResponse) -> NextStep {
        let calls: Vec<ToolCallRequest> = response
            .tool_calls()
            .iter()
            .map(ToolCallRequest::from)
            .collect();
        if !calls.is_empty() {
            return NextStep::ToolCalls { calls };
        }
        NextStep::FinalOutput {
            output: response.text().unwrap_or_default().to_string(),
        }
    }

    /// Execute a single tool call and record the outcome.
    async fn execute_single_tool(call: &ToolCallRequest, tools: &[BoxedTool]) -> ToolCallRecord {
        let tool_span = info_span!(
            "tool",
            tool.name = %call.name,
            tool.id = %call.id,
            tool.input = %call.arguments,
            tool.success = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        async {
            let (result, success) =
                if let Some(tool) = tools.iter().find(|t| t.name() == call.name) {
                    Self::dispatch_tool(tool, call).await
                } else {
                    warn!(tool = %call.name, "Tool not found");
                    let err = ToolError::not_found(&call.name);
                    (format!("Tool error: {err}"), false)
                };

            let current = tracing::Span::current();
            current.record("tool.success", success);
            if !success {
                current.record("error", result.as_str());
            }

            ToolCallRecord {
                id: call.id.clone(),
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                result,
                success,
            }
        }
        .instrument(tool_span)
        .await
    }

    /// Dispatch a tool call via the [`DynTool`](crate::tool::DynTool) interface.
    async fn dispatch_tool(tool: &BoxedTool, call: &ToolCallRequest) -> (String, bool) {
        match tool.call_json(call.arguments.clone()).await {
            Ok(value) => {
                let output = serde_json::to_string(&value).unwrap_or_else(|_| value.to_string());
                (output, true)
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                (format!("Tool error: {e}"), false)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::chat::{ChatResponse, StopReason};
    use crate::message::ToolCall;

    #[test]
    fn classify_text_is_final_output() {
        let response = ChatResponse::from_text("done");
        match Runner::classify_response(&response) {
            NextStep::FinalOutput { output } => assert_eq!(output, "done"),
            NextStep::ToolCalls { .. } => panic!("expected final output"),
        }
    }

    #[test]
    fn classify_tool_calls() {
        let call = ToolCall::function("c1", "web_search", r#"{"query":"x"}"#);
        let response = ChatResponse::new(Message::assistant_with_tool_calls(None, vec![call]))
            .with_stop_reason(StopReason::ToolCalls);
        match Runner::classify_response(&response) {
            NextStep::ToolCalls { calls } => {
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].name, "web_search");
            }
            NextStep::FinalOutput { .. } => panic!("expected tool calls"),
        }
    }

    #[test]
    fn classify_empty_tool_calls_is_final() {
        let response = ChatResponse::new(Message::assistant_with_tool_calls(
            Some("text anyway".to_string()),
            vec![],
        ));
        match Runner::classify_response(&response) {
            NextStep::FinalOutput { output } => assert_eq!(output, "text anyway"),
            NextStep::ToolCalls { .. } => panic!("expected final output"),
        }
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_not_fatal() {
        let call = ToolCallRequest {
            id: "c1".to_string(),
            name: "nope".to_string(),
            arguments: serde_json::json!({}),
        };
        let record = Runner::execute_single_tool(&call, &[]).await;
        assert!(!record.success);
        assert!(record.result.starts_with("Tool error:"));
        assert_eq!(record.result, "Tool error: Tool not found: nope");
    }
}
