//! End-to-end tests over the agent loop and task force, driven by the
//! scripted mock provider.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use civitas::agent::{Agent, RunConfig, Runner};
use civitas::chat::{ChatResponse, StopReason};
use civitas::error::{Error, ToolError};
use civitas::llms::MockProvider;
use civitas::message::{Message, ToolCall};
use civitas::taskforce::TaskForce;
use civitas::tool::Tool;
use civitas::tools::AirQualityCsvTool;

const SAMPLE_CSV: &str = "date,pm25,pm10,no2\n\
    2025-01-01,65,118,40\n\
    2025-03-01,58,100,38\n\
    2025-05-01,50,92,35\n\
    2025-07-01,44,85,32\n";

struct EchoTool;

#[derive(Deserialize)]
struct EchoArgs {
    text: String,
}

#[async_trait]
impl Tool for EchoTool {
    const NAME: &'static str = "echo";
    type Args = EchoArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Echoes the input text".to_string()
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "text": { "type": "string" } },
            "required": ["text"]
        })
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(args.text)
    }
}

fn tool_call_response(id: &str, name: &str, arguments: &str) -> ChatResponse {
    let call = ToolCall::function(id, name, arguments);
    ChatResponse::new(Message::assistant_with_tool_calls(None, vec![call]))
        .with_stop_reason(StopReason::ToolCalls)
}

#[tokio::test]
async fn agent_loop_executes_tool_then_finishes() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        tool_call_response("call_1", "echo", r#"{"text":"ping"}"#),
        ChatResponse::from_text("done"),
    ]));

    let agent = Agent::new("echo agent")
        .instructions("Use the echo tool, then answer.")
        .provider(provider)
        .tool(Box::new(EchoTool));

    let result = agent.run("say ping").await.unwrap();

    assert_eq!(result.output, "done");
    assert_eq!(result.steps, 2);
    assert_eq!(result.agent_name, "echo agent");

    let first_step = &result.step_history[0];
    assert_eq!(first_step.tool_calls.len(), 1);
    let record = &first_step.tool_calls[0];
    assert!(record.success);
    assert_eq!(record.name, "echo");
    assert_eq!(record.result, "\"ping\"");
}

#[tokio::test]
async fn tool_failure_is_fed_back_not_fatal() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        tool_call_response("call_1", "echo", "{}"),
        ChatResponse::from_text("recovered"),
    ]));

    let agent = Agent::new("a").provider(provider).tool(Box::new(EchoTool));
    let result = agent.run("go").await.unwrap();

    assert_eq!(result.output, "recovered");
    let record = &result.step_history[0].tool_calls[0];
    assert!(!record.success);
    assert!(record.result.starts_with("Tool error:"));
}

#[tokio::test]
async fn max_steps_is_an_error() {
    // Always asks for a tool call, never finishes.
    let provider = Arc::new(MockProvider::with_responses(vec![tool_call_response(
        "call_1",
        "echo",
        r#"{"text":"again"}"#,
    )]));

    let agent = Agent::new("looper").provider(provider).tool(Box::new(EchoTool));
    let config = RunConfig {
        max_steps: Some(2),
        ..Default::default()
    };

    let err = Runner::run(&agent, "go", &config).await.unwrap_err();
    assert!(matches!(err, Error::MaxSteps { max_steps: 2 }));
}

#[tokio::test]
async fn missing_provider_is_an_error() {
    let agent = Agent::new("unconfigured");
    let err = agent.run("go").await.unwrap_err();
    assert!(matches!(err, Error::Agent(_)));
    assert!(err.to_string().contains("no provider configured"));
}

#[tokio::test]
async fn csv_tool_drives_analysis_through_the_loop() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("air.csv");
    file.write_str(SAMPLE_CSV).unwrap();

    let arguments = json!({"file_path": file.path().to_string_lossy()}).to_string();
    let provider = Arc::new(MockProvider::with_responses(vec![
        tool_call_response("call_1", "analyze_air_quality_csv", &arguments),
        ChatResponse::from_text("The air quality is improving."),
    ]));

    let agent = Agent::new("Data Analyst")
        .provider(provider)
        .tool(Box::new(AirQualityCsvTool::new()));

    let result = agent.run("Analyze the dataset").await.unwrap();

    assert_eq!(result.output, "The air quality is improving.");
    let record = &result.step_history[0].tool_calls[0];
    assert!(record.success);
    assert!(record.result.contains("Rows: 4"));
    assert!(record.result.contains("Means: pm25=54.25; pm10=98.75; no2=36.25"));
}

#[tokio::test]
async fn task_force_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("air.csv");
    file.write_str(SAMPLE_CSV).unwrap();

    let provider = Arc::new(MockProvider::new(vec![
        "news section".to_string(),
        "policy section".to_string(),
        "innovations section".to_string(),
        "merged proposal".to_string(),
    ]));

    let force = TaskForce::new(provider);
    let report = force
        .run("Lahore, Pakistan", Some(file.path()))
        .await
        .unwrap();

    assert_eq!(report.news, "news section");
    assert_eq!(report.policy, "policy section");
    assert_eq!(report.innovations, "innovations section");
    assert_eq!(report.proposal, "merged proposal");

    // The data section is the summarizer output, verbatim.
    assert!(report.data.starts_with("Rows: 4"));
    assert!(report.data.contains("Date range: 2025-01-01 → 2025-07-01"));

    let rendered = report.to_string();
    assert!(rendered.contains("# Sustainability Report: Lahore, Pakistan"));
    assert!(rendered.contains("## Proposal"));
}
