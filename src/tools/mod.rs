//! Built-in tools for agents.

mod air_quality;
mod hacker_news;
mod web_search;

pub use air_quality::AirQualityCsvTool;
pub use hacker_news::HackerNewsTool;
pub use web_search::WebSearchTool;
