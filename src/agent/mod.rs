//! Agent configuration and execution.
//!
//! An [`Agent`] is pure configuration; the [`Runner`] is the stateless
//! engine that drives the reasoning loop against a provider.

mod config;
mod result;
mod runner;

pub use config::{Agent, DEFAULT_MAX_STEPS};
pub use result::{NextStep, RunConfig, RunResult, StepInfo, ToolCallRecord, ToolCallRequest};
pub use runner::Runner;
