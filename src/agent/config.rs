//! Agent configuration.

use std::fmt;

use crate::agent::runner::Runner;
use crate::agent::{RunConfig, RunResult};
use crate::chat::SharedChatProvider;
use crate::error::Result;
use crate::tool::BoxedTool;

/// Default maximum number of reasoning steps.
pub const DEFAULT_MAX_STEPS: usize = 10;

/// A configured agent: instructions, model, provider, and tools.
///
/// Agents hold no runtime state. Running one is delegated to the
/// [`Runner`].
pub struct Agent {
    pub(crate) name: String,
    pub(crate) instructions: String,
    pub(crate) model: String,
    pub(crate) provider: Option<SharedChatProvider>,
    pub(crate) tools: Vec<BoxedTool>,
    pub(crate) max_steps: usize,
    pub(crate) description: Option<String>,
}

impl Agent {
    /// Create an agent with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            model: String::new(),
            provider: None,
            tools: Vec::new(),
            max_steps: DEFAULT_MAX_STEPS,
            description: None,
        }
    }

    /// Set the system instructions.
    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Set the model. Empty means the provider's default.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the chat provider.
    #[must_use]
    pub fn provider(mut self, provider: SharedChatProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Add a tool.
    #[must_use]
    pub fn tool(mut self, tool: BoxedTool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add several tools.
    #[must_use]
    pub fn tools(mut self, tools: Vec<BoxedTool>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Set the maximum number of reasoning steps.
    #[must_use]
    pub const fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set a short description of the agent's role.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The agent's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured model.
    #[must_use]
    pub fn get_model(&self) -> &str {
        &self.model
    }

    /// The agent's description, if any.
    #[must_use]
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of configured tools.
    #[must_use]
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Whether a provider has been configured.
    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Run the agent on an input with default run options.
    pub async fn run(&self, input: impl Into<String> + Send) -> Result<RunResult> {
        Runner::run(self, input, &RunConfig::default()).await
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("max_steps", &self.max_steps)
            .field("has_provider", &self.provider.is_some())
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tools::WebSearchTool;

    #[test]
    fn builder_composes() {
        let agent = Agent::new("News Analyst")
            .description("Finds recent sustainability news")
            .instructions("You research city sustainability news.")
            .model("qwen/qwen3-32b")
            .max_steps(5)
            .tool(Box::new(WebSearchTool::new()));

        assert_eq!(agent.name(), "News Analyst");
        assert_eq!(agent.get_model(), "qwen/qwen3-32b");
        assert_eq!(agent.tool_count(), 1);
        assert!(!agent.has_provider());
        assert_eq!(
            agent.get_description(),
            Some("Finds recent sustainability news")
        );
    }

    #[test]
    fn defaults() {
        let agent = Agent::new("a");
        assert_eq!(agent.max_steps, DEFAULT_MAX_STEPS);
        assert!(agent.instructions.is_empty());
        assert_eq!(agent.tool_count(), 0);
    }

    #[test]
    fn debug_lists_tool_names() {
        let agent = Agent::new("a").tool(Box::new(WebSearchTool::new()));
        let debug = format!("{agent:?}");
        assert!(debug.contains("web_search"));
        assert!(debug.contains("has_provider: false"));
    }
}
