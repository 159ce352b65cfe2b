//! Deterministic CSV analysis.
//!
//! The only locally computed logic in the crate: load a delimited file,
//! detect date and pollutant columns, and produce a plain-text summary
//! ([`summarize`]). [`dispatch`] maps a free-form request onto a single
//! summarize call.

mod dataset;
mod dispatch;
mod report;

pub use dataset::{Dataset, DATE_CANDIDATES, POLLUTANT_VOCABULARY};
pub use dispatch::{dispatch, extract_path};
pub use report::summarize;
