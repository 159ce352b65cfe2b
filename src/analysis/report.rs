//! Plain-text summary report over a loaded dataset.

use std::path::Path;

use crate::analysis::Dataset;
use crate::error::AnalysisError;

/// Minimum row count before head/tail trends are computed.
const TREND_MIN_ROWS: usize = 8;

/// Deltas smaller than this are treated as flat and skipped.
const TREND_EPSILON: f64 = 1e-6;

/// Number of rows shown in the fallback preview.
const PREVIEW_ROWS: usize = 5;

/// Summarize a CSV file into a multi-line text report.
///
/// The report is built additively: row count, then a date range when a
/// date column parsed, then per-pollutant means and a head/tail trend
/// line when pollutant columns are present, otherwise a preview of the
/// first rows. Two calls over an unchanged file produce byte-identical
/// output.
pub fn summarize(path: &Path) -> Result<String, AnalysisError> {
    let dataset = Dataset::load(path)?;
    let mut lines = vec![format!("Rows: {}", dataset.len())];

    if dataset.date_column().is_some() {
        if let Some((min, max)) = dataset.date_bounds() {
            lines.push(format!("Date range: {} → {}", min.date(), max.date()));
        }
    }

    let pollutants = dataset.pollutant_columns();
    if pollutants.is_empty() {
        lines.push("No standard pollutant columns found. Showing the first rows:".to_string());
        lines.push(render_preview(&dataset));
    } else {
        if let Some(means) = render_means(&dataset, &pollutants) {
            lines.push(means);
        }
        if let Some(trends) = render_trends(&dataset, &pollutants) {
            lines.push(trends);
        }
    }

    Ok(lines.join("\n"))
}

fn render_means(dataset: &Dataset, pollutants: &[&str]) -> Option<String> {
    let parts: Vec<String> = pollutants
        .iter()
        .filter_map(|col| dataset.mean(col).map(|mean| format!("{col}={mean:.2}")))
        .collect();
    (!parts.is_empty()).then(|| format!("Means: {}", parts.join("; ")))
}

fn render_trends(dataset: &Dataset, pollutants: &[&str]) -> Option<String> {
    let n = dataset.len();
    if dataset.date_column().is_none() || !dataset.has_parsed_dates() || n < TREND_MIN_ROWS {
        return None;
    }

    // Head and tail quartiles of the date-sorted rows. Taken
    // independently, so for small n they may overlap.
    let quartile = n / 4;
    let parts: Vec<String> = pollutants
        .iter()
        .filter_map(|col| {
            let head = dataset.mean_over(col, 0..quartile)?;
            let tail = dataset.mean_over(col, n - quartile..n)?;
            let delta = tail - head;
            if delta.abs() < TREND_EPSILON {
                return None;
            }
            let direction = if delta < 0.0 { "decreasing" } else { "increasing" };
            Some(format!("{col}: {direction} (~{delta:.2})"))
        })
        .collect();
    (!parts.is_empty()).then(|| format!("Simple trends: {}", parts.join("; ")))
}

fn render_preview(dataset: &Dataset) -> String {
    let columns = dataset.columns();
    let rows = &dataset.rows()[..dataset.len().min(PREVIEW_ROWS)];

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(String::len)
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:>width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = vec![render_row(columns.iter().map(String::as_str).collect())];
    for row in rows {
        out.push(render_row(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}
