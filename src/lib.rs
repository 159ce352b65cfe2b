//! civitas — a multi-agent task force that assembles city sustainability
//! reports.
//!
//! Five pre-built agents (news, policy, innovations, data, synthesis)
//! run sequentially over a Groq-hosted model and merge their outputs
//! into one proposal. The only locally computed logic is a CSV
//! summarizer for air quality readings.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use civitas::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let provider = Arc::new(Groq::from_env()?);
//! let force = TaskForce::new(provider);
//! let report = force.run("Lahore, Pakistan", None).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod analysis;
pub mod chat;
pub mod error;
pub mod llms;
pub mod message;
pub mod prelude;
pub mod taskforce;
pub mod tool;
pub mod tools;
pub mod usage;

pub use error::{AnalysisError, Error, LlmError, Result, ToolError};
