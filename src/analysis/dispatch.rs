//! Free-form request to summarizer dispatch.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::summarize;
use crate::error::AnalysisError;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'([^']+)'|"([^"]+)""#).expect("valid regex"));

/// Extract a CSV path from free-form request text.
///
/// The first quoted substring wins. Without quotes, the first
/// whitespace-separated token containing `.csv` is taken, with
/// surrounding punctuation stripped.
#[must_use]
pub fn extract_path(request: &str) -> Option<String> {
    if let Some(captures) = QUOTED.captures(request) {
        let quoted = captures.get(1).or_else(|| captures.get(2));
        if let Some(m) = quoted {
            return Some(m.as_str().to_string());
        }
    }

    request
        .split_whitespace()
        .find(|token| token.contains(".csv"))
        .map(|token| token.trim_matches([',', ';', ':', '!', '?', '(', ')']).to_string())
}

/// Handle a free-form summarization request.
///
/// Extracts a path from the request text, runs [`summarize`] exactly
/// once, and returns its output verbatim. No retries, no caching.
pub fn dispatch(request: &str) -> Result<String, AnalysisError> {
    let path = extract_path(request)
        .ok_or_else(|| AnalysisError::MissingPath(request.to_string()))?;
    summarize(Path::new(&path))
}
