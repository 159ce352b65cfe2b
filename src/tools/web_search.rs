//! Web search over the DuckDuckGo Lite HTML interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;
use crate::tool::Tool;

/// Searches the web and returns the top results as markdown.
#[derive(Debug, Clone, Copy)]
pub struct WebSearchTool {
    /// Maximum number of results to return.
    pub max_results: usize,
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self { max_results: 10 }
    }
}

/// Arguments for web search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchArgs {
    /// The search query to perform.
    pub query: String,
}

/// A single search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the result.
    pub title: String,
    /// URL of the result.
    pub link: String,
    /// Description/snippet of the result.
    pub description: String,
}

impl WebSearchTool {
    /// Create a new web search tool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum results.
    #[must_use]
    pub const fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    fn format_results(results: &[SearchResult]) -> String {
        let mut output = String::from("## Search Results\n\n");
        for result in results {
            output.push_str(&format!(
                "[{}]({})\n{}\n\n",
                result.title, result.link, result.description
            ));
        }
        output
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| ToolError::execution(e.to_string()))?;

        let url = format!(
            "https://lite.duckduckgo.com/lite/?q={}",
            urlencoding::encode(query)
        );

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::execution(format!("Request failed: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| ToolError::execution(format!("Failed to read response: {e}")))?;

        Ok(parse_lite_html(&html)
            .into_iter()
            .take(self.max_results)
            .collect())
    }
}

/// Parse the DuckDuckGo Lite HTML response with regex.
fn parse_lite_html(html: &str) -> Vec<SearchResult> {
    let mut results = Vec::new();

    let link_re =
        regex::Regex::new(r#"class="result-link"[^>]*href="([^"]+)"[^>]*>([^<]+)</a>"#).ok();
    let snippet_re = regex::Regex::new(r#"class="result-snippet"[^>]*>([^<]+)"#).ok();

    if let (Some(link_regex), Some(snippet_regex)) = (link_re, snippet_re) {
        let links: Vec<_> = link_regex.captures_iter(html).collect();
        let snippets: Vec<_> = snippet_regex.captures_iter(html).collect();

        for (i, link_cap) in links.iter().enumerate() {
            let url = link_cap.get(1).map(|m| m.as_str()).unwrap_or_default();
            let title = link_cap.get(2).map(|m| m.as_str()).unwrap_or_default();
            let description = snippets
                .get(i)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
                .unwrap_or_default();

            if !url.is_empty() && !title.is_empty() {
                results.push(SearchResult {
                    title: title.trim().to_string(),
                    link: url.to_string(),
                    description: description.trim().to_string(),
                });
            }
        }
    }

    results
}

#[async_trait]
impl Tool for WebSearchTool {
    const NAME: &'static str = "web_search";
    type Args = WebSearchArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Performs a web search for a query and returns the top search results formatted as markdown.".to_string()
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to perform"
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let results = self.search(&args.query).await?;

        if results.is_empty() {
            return Err(ToolError::execution(
                "No results found! Try a less restrictive/shorter query.",
            ));
        }

        Ok(Self::format_results(&results))
    }
}
