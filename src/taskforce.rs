//! The five-role city sustainability task force.
//!
//! Four section agents gather material for a city (news, policy,
//! innovations, local data) and a synthesizer merges their outputs into
//! one proposal. Everything runs strictly sequentially.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::agent::{Agent, RunConfig, Runner};
use crate::analysis;
use crate::chat::SharedChatProvider;
use crate::error::Result;
use crate::tools::{AirQualityCsvTool, HackerNewsTool, WebSearchTool};

const NEWS_INSTRUCTIONS: &str = "\
You are a news analyst covering urban sustainability. Given a city, find \
news from the past year about its sustainability initiatives: air quality \
programs, public transit, green energy, waste management, urban greening. \
Summarize the most significant developments as concise bullet points and \
cite the source for each item.";

const POLICY_INSTRUCTIONS: &str = "\
You are a policy reviewer specializing in municipal and regional \
environmental regulation. Given a city, identify current sustainability \
policies, ordinances, and plans that apply to it. For each policy report \
its name, adoption or effective date, current status, and a link to an \
official source where available.";

const INNOVATIONS_INSTRUCTIONS: &str = "\
You are an innovations scout for urban sustainability technology. Given a \
city, find recent technologies and pilot programs relevant to its \
sustainability challenges: sensors, clean mobility, building efficiency, \
circular economy. Prefer concrete deployments and pilots over concepts, \
and note which could transfer to the given city.";

const DATA_INSTRUCTIONS: &str = "\
You are a data analyst. When asked about an air quality dataset, call the \
analyze_air_quality_csv tool with the file path and report its output \
along with a short interpretation of what the numbers mean for the city.";

const SYNTHESIZER_INSTRUCTIONS: &str = "\
You are a proposal writer. You receive research sections about one city's \
sustainability situation: recent news, policy landscape, data insights, \
and innovation opportunities. Merge them into a single coherent proposal \
with these sections: Executive Summary, Recent Initiatives, Policy \
Landscape, Data Insights, Innovation Opportunities, Next Steps. Keep \
every cited source. Do not invent facts that are not in the sections.";

/// Text outputs of the four section agents, fed to the synthesizer.
#[derive(Debug, Clone, Default)]
pub struct SectionOutputs {
    /// News Analyst output.
    pub news: String,
    /// Policy Reviewer output.
    pub policy: String,
    /// Innovations Scout output.
    pub innovations: String,
    /// Data section (air quality summary or a placeholder).
    pub data: String,
}

/// A full task force report for one city.
#[derive(Debug, Clone)]
pub struct TaskForceReport {
    /// The city the report covers.
    pub city: String,
    /// News Analyst output.
    pub news: String,
    /// Policy Reviewer output.
    pub policy: String,
    /// Innovations Scout output.
    pub innovations: String,
    /// Data section output.
    pub data: String,
    /// The merged proposal.
    pub proposal: String,
}

impl fmt::Display for TaskForceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Sustainability Report: {}\n", self.city)?;
        writeln!(f, "## News\n\n{}\n", self.news)?;
        writeln!(f, "## Policy\n\n{}\n", self.policy)?;
        writeln!(f, "## Innovations\n\n{}\n", self.innovations)?;
        writeln!(f, "## Data\n\n{}\n", self.data)?;
        write!(f, "## Proposal\n\n{}", self.proposal)
    }
}

/// Builds and runs the five pre-configured agents.
pub struct TaskForce {
    provider: SharedChatProvider,
    model: String,
}

impl TaskForce {
    /// Create a task force using the provider's default model.
    #[must_use]
    pub fn new(provider: SharedChatProvider) -> Self {
        let model = provider.default_model().to_string();
        Self { provider, model }
    }

    /// Override the model used by every agent.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn role(&self, name: &str, description: &str, instructions: &str) -> Agent {
        Agent::new(name)
            .description(description)
            .instructions(instructions)
            .model(&self.model)
            .provider(Arc::clone(&self.provider))
    }

    /// The News Analyst agent.
    #[must_use]
    pub fn news_analyst(&self) -> Agent {
        self.role(
            "News Analyst",
            "Finds recent city sustainability news",
            NEWS_INSTRUCTIONS,
        )
        .tool(Box::new(WebSearchTool::new()))
    }

    /// The Policy Reviewer agent.
    #[must_use]
    pub fn policy_reviewer(&self) -> Agent {
        self.role(
            "Policy Reviewer",
            "Summarizes municipal sustainability policy",
            POLICY_INSTRUCTIONS,
        )
        .tool(Box::new(WebSearchTool::new()))
    }

    /// The Innovations Scout agent.
    #[must_use]
    pub fn innovations_scout(&self) -> Agent {
        self.role(
            "Innovations Scout",
            "Finds urban sustainability tech and pilots",
            INNOVATIONS_INSTRUCTIONS,
        )
        .tool(Box::new(HackerNewsTool::new()))
        .tool(Box::new(WebSearchTool::new()))
    }

    /// The Data Analyst agent, for LLM-driven CSV analysis.
    #[must_use]
    pub fn data_analyst(&self) -> Agent {
        self.role(
            "Data Analyst",
            "Analyzes local air quality data",
            DATA_INSTRUCTIONS,
        )
        .tool(Box::new(AirQualityCsvTool::new()))
    }

    /// The Proposal Synthesizer agent.
    #[must_use]
    pub fn synthesizer(&self) -> Agent {
        self.role(
            "Proposal Synthesizer",
            "Merges section outputs into one proposal",
            SYNTHESIZER_INSTRUCTIONS,
        )
    }

    /// Run the News Analyst for a city.
    pub async fn run_news(&self, city: &str) -> Result<String> {
        let agent = self.news_analyst();
        let input = format!("Find sustainability news from the past year for {city}.");
        let result = Runner::run(&agent, input, &RunConfig::default()).await?;
        Ok(result.output)
    }

    /// Run the Policy Reviewer for a city.
    pub async fn run_policy(&self, city: &str) -> Result<String> {
        let agent = self.policy_reviewer();
        let input = format!("Summarize current sustainability policies for {city}.");
        let result = Runner::run(&agent, input, &RunConfig::default()).await?;
        Ok(result.output)
    }

    /// Run the Innovations Scout for a city.
    pub async fn run_innovations(&self, city: &str) -> Result<String> {
        let agent = self.innovations_scout();
        let input =
            format!("Find recent urban sustainability technologies and pilots relevant to {city}.");
        let result = Runner::run(&agent, input, &RunConfig::default()).await?;
        Ok(result.output)
    }

    /// Handle a free-form data request.
    ///
    /// Maps the request text directly onto one summarizer call and
    /// returns its output verbatim. No model in the loop.
    pub fn run_data(&self, request: &str) -> Result<String> {
        Ok(analysis::dispatch(request)?)
    }

    /// Run the Proposal Synthesizer over the four section outputs.
    pub async fn synthesize(&self, city: &str, sections: &SectionOutputs) -> Result<String> {
        let agent = self.synthesizer();
        let input = format!(
            "City: {city}\n\n\
             ## News\n{}\n\n\
             ## Policy\n{}\n\n\
             ## Innovations\n{}\n\n\
             ## Data\n{}\n\n\
             Write the proposal.",
            sections.news, sections.policy, sections.innovations, sections.data
        );
        let result = Runner::run(&agent, input, &RunConfig::default()).await?;
        Ok(result.output)
    }

    /// Run the full pipeline for a city, strictly sequentially.
    pub async fn run(&self, city: &str, csv_path: Option<&Path>) -> Result<TaskForceReport> {
        let news = self.run_news(city).await?;
        let policy = self.run_policy(city).await?;
        let innovations = self.run_innovations(city).await?;

        let data = match csv_path {
            Some(path) => self.run_data(&format!(
                "Summarize the air quality readings in '{}'.",
                path.display()
            ))?,
            None => "No air quality dataset was provided.".to_string(),
        };

        let sections = SectionOutputs {
            news,
            policy,
            innovations,
            data,
        };
        let proposal = self.synthesize(city, &sections).await?;

        Ok(TaskForceReport {
            city: city.to_string(),
            news: sections.news,
            policy: sections.policy,
            innovations: sections.innovations,
            data: sections.data,
            proposal,
        })
    }
}

impl fmt::Debug for TaskForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskForce")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::llms::MockProvider;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn force(responses: Vec<&str>) -> TaskForce {
        TaskForce::new(Arc::new(MockProvider::new(
            responses.into_iter().map(String::from).collect(),
        )))
    }

    #[test]
    fn agents_have_expected_tools() {
        let force = force(vec![]);
        assert_eq!(force.news_analyst().tool_count(), 1);
        assert_eq!(force.policy_reviewer().tool_count(), 1);
        assert_eq!(force.innovations_scout().tool_count(), 2);
        assert_eq!(force.data_analyst().tool_count(), 1);
        assert_eq!(force.synthesizer().tool_count(), 0);
    }

    #[test]
    fn model_defaults_to_provider() {
        let force = force(vec![]);
        assert_eq!(force.news_analyst().get_model(), "mock-model");

        let overridden = force.with_model("other-model");
        assert_eq!(overridden.news_analyst().get_model(), "other-model");
    }

    #[test]
    fn run_data_is_verbatim_summary() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("air.csv");
        file.write_str("date,pm25\n2025-01-01,65\n2025-03-01,58\n")
            .unwrap();

        let force = force(vec![]);
        let request = format!("Summarize the air quality readings in '{}'.", file.path().display());
        let output = force.run_data(&request).unwrap();
        assert_eq!(output, analysis::summarize(file.path()).unwrap());
    }

    #[tokio::test]
    async fn full_run_fills_every_section() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("air.csv");
        file.write_str(
            "date,pm25,pm10,no2\n\
             2025-01-01,65,118,40\n\
             2025-03-01,58,100,38\n\
             2025-05-01,50,92,35\n\
             2025-07-01,44,85,32\n",
        )
        .unwrap();

        let force = force(vec![
            "news section",
            "policy section",
            "innovations section",
            "merged proposal",
        ]);
        let report = force
            .run("Lahore, Pakistan", Some(file.path()))
            .await
            .unwrap();

        assert_eq!(report.city, "Lahore, Pakistan");
        assert_eq!(report.news, "news section");
        assert_eq!(report.policy, "policy section");
        assert_eq!(report.innovations, "innovations section");
        assert!(report.data.contains("Rows: 4"));
        assert!(report.data.contains("Means: pm25=54.25; pm10=98.75; no2=36.25"));
        assert_eq!(report.proposal, "merged proposal");
    }

    #[tokio::test]
    async fn run_without_csv_uses_placeholder() {
        let force = force(vec!["n", "p", "i", "proposal"]);
        let report = force.run("Lahore, Pakistan", None).await.unwrap();
        assert_eq!(report.data, "No air quality dataset was provided.");
    }

    #[test]
    fn display_renders_all_sections() {
        let report = TaskForceReport {
            city: "Lahore".to_string(),
            news: "n".to_string(),
            policy: "p".to_string(),
            innovations: "i".to_string(),
            data: "d".to_string(),
            proposal: "pr".to_string(),
        };
        let rendered = report.to_string();
        assert!(rendered.contains("# Sustainability Report: Lahore"));
        for header in ["## News", "## Policy", "## Innovations", "## Data", "## Proposal"] {
            assert!(rendered.contains(header), "missing {header}");
        }
    }
}
