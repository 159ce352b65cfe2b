//! Hacker News story search over the Algolia API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;
use crate::tool::Tool;

/// Searches Hacker News stories and returns the top hits as markdown.
#[derive(Debug, Clone, Copy)]
pub struct HackerNewsTool {
    /// Maximum number of stories to return.
    pub max_results: usize,
}

impl Default for HackerNewsTool {
    fn default() -> Self {
        Self { max_results: 10 }
    }
}

/// Arguments for Hacker News search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackerNewsArgs {
    /// The search query to perform.
    pub query: String,
}

#[derive(Debug, Deserialize)]
struct AlgoliaResponse {
    hits: Vec<AlgoliaHit>,
}

#[derive(Debug, Deserialize)]
struct AlgoliaHit {
    title: Option<String>,
    url: Option<String>,
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    points: u32,
    #[serde(default)]
    num_comments: u32,
}

impl HackerNewsTool {
    /// Create a new Hacker News search tool.
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

    async fn search(&self, query: &str) -> Result<Vec<AlgoliaHit>, ToolError> {
        let url = format!(
            "https://hn.algolia.com/api/v1/search?query={}&tags=story&hitsPerPage={}",
            urlencoding::encode(query),
            self.max_results
        );

        let response = reqwest::Client::new()
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::execution(format!("Request failed: {e}")))?;

        let parsed: AlgoliaResponse = response
            .json()
            .await
            .map_err(|e| ToolError::execution(format!("Failed to parse response: {e}")))?;

        Ok(parsed.hits)
    }

    fn format_hits(hits: &[AlgoliaHit]) -> String {
        let mut output = String::from("## Hacker News Stories\n\n");
        for hit in hits {
            let title = hit.title.as_deref().unwrap_or("(untitled)");
            let link = hit.url.clone().unwrap_or_else(|| {
                format!("https://news.ycombinator.com/item?id={}", hit.object_id)
            });
            output.push_str(&format!(
                "[{}]({})\n{} points, {} comments\n\n",
                title, link, hit.points, hit.num_comments
            ));
        }
        output
    }
}

#[async_trait]
impl Tool for HackerNewsTool {
    const NAME: &'static str = "search_hacker_news";
    type Args = HackerNewsArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Searches Hacker News stories for a query and returns the top hits with points and comment counts.".to_string()
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
        let hits = self.search(&args.query).await?;

        if hits.is_empty() {
            return Err(ToolError::execution(
                "No stories found! Try a less restrictive/shorter query.",
            ));
        }

        Ok(Self::format_hits(&hits))
    }
}
