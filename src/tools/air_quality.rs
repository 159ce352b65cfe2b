//! CSV air-quality analysis exposed as an agent tool.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis;
use crate::error::ToolError;
use crate::tool::Tool;

/// Summarizes an air-quality CSV file.
///
/// Wraps [`analysis::summarize`] so the model can drive the analysis
/// through function calling.
#[derive(Debug, Clone, Copy, Default)]
pub struct AirQualityCsvTool;

impl AirQualityCsvTool {
    /// Create a new CSV analysis tool.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Arguments for CSV analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityCsvArgs {
    /// Path to the CSV file to summarize.
    pub file_path: String,
}

#[async_trait]
impl Tool for AirQualityCsvTool {
    const NAME: &'static str = "analyze_air_quality_csv";
    type Args = AirQualityCsvArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Analyzes an air quality CSV file and returns row count, date range, pollutant means, and simple trends.".to_string()
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the CSV file to analyze"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(analysis::summarize(Path::new(&args.file_path))?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn summarizes_csv_through_call_json() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("air.csv");
        file.write_str("date,pm25\n2025-01-01,65\n2025-03-01,58\n")
            .unwrap();

        let args = json!({"file_path": file.path().to_string_lossy()});
        let output = AirQualityCsvTool::new().call_json(args).await.unwrap();
        let text = output.as_str().unwrap();
        assert!(text.starts_with("Rows: 2"));
        assert!(text.contains("Means: pm25=61.50"));
    }

    #[tokio::test]
    async fn missing_file_is_execution_error() {
        let args = json!({"file_path": "/nonexistent/air.csv"});
        let err = AirQualityCsvTool::new().call_json(args).await.unwrap_err();
        assert!(matches!(err, ToolError::Execution(_)));
    }

    #[test]
    fn definition_requires_file_path() {
        let def = crate::tool::Tool::definition(&AirQualityCsvTool::new());
        assert_eq!(def.name, "analyze_air_quality_csv");
        assert_eq!(def.parameters["required"][0], "file_path");
    }
}
