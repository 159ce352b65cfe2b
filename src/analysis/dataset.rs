//! In-memory tabular dataset with date-aware ordering.

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::AnalysisError;

/// Column names recognized as a date column, in priority order.
pub const DATE_CANDIDATES: [&str; 4] = ["date", "timestamp", "day", "datetime"];

/// Pollutant column names recognized by the summarizer, in report order.
pub const POLLUTANT_VOCABULARY: [&str; 8] =
    ["pm25", "pm2_5", "pm10", "no2", "so2", "co", "o3", "aqi"];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// A CSV file loaded into memory.
///
/// Headers are normalized (trimmed, lowercased) at load time. If a date
/// column is recognized the rows are stable-sorted ascending by parsed
/// date, rows without a parseable date last. Rows are never dropped.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
    date_column: Option<String>,
    dates: Vec<Option<NaiveDateTime>>,
}

impl Dataset {
    /// Load a CSV file from disk.
    ///
    /// Fails only when the file is missing, unreadable, or not parseable
    /// as delimited text (for example ragged rows). Cell-level oddities
    /// such as unparseable dates or non-numeric values are tolerated.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let mut reader = csv::ReaderBuilder::new()
            .from_path(path)
            .map_err(|e| AnalysisError::load(path, e.to_string()))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| AnalysisError::load(path, e.to_string()))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| AnalysisError::load(path, e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        // Duplicate headers are not deduplicated; the last column wins
        // for lookups.
        let mut index = HashMap::new();
        for (position, name) in columns.iter().enumerate() {
            index.insert(name.clone(), position);
        }

        let date_column = DATE_CANDIDATES
            .iter()
            .find(|candidate| index.contains_key(**candidate))
            .map(|candidate| (*candidate).to_string());

        let mut dataset = Self {
            columns,
            rows,
            index,
            date_column,
            dates: Vec::new(),
        };
        dataset.parse_and_sort_dates();
        Ok(dataset)
    }

    fn parse_and_sort_dates(&mut self) {
        let Some(position) = self
            .date_column
            .as_deref()
            .and_then(|name| self.index.get(name).copied())
        else {
            return;
        };

        let parsed: Vec<Option<NaiveDateTime>> = self
            .rows
            .iter()
            .map(|row| row.get(position).and_then(|cell| parse_datetime(cell)))
            .collect();

        // Stable sort ascending, missing dates last.
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| match (&parsed[a], &parsed[b]) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let sorted_rows = order.iter().map(|&i| self.rows[i].clone()).collect();
        self.rows = sorted_rows;
        self.dates = order.iter().map(|&i| parsed[i]).collect();
    }

    /// Normalized column names in load order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, sorted by date when a date column was recognized.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The recognized date column, if any.
    #[must_use]
    pub fn date_column(&self) -> Option<&str> {
        self.date_column.as_deref()
    }

    /// Whether at least one date value parsed.
    #[must_use]
    pub fn has_parsed_dates(&self) -> bool {
        self.dates.iter().any(Option::is_some)
    }

    /// Earliest and latest parsed dates.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut parsed = self.dates.iter().filter_map(|d| *d);
        let first = parsed.next()?;
        let (min, max) = parsed.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));
        Some((min, max))
    }

    /// Position of a column by normalized name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Recognized pollutant columns, in vocabulary order.
    #[must_use]
    pub fn pollutant_columns(&self) -> Vec<&'static str> {
        POLLUTANT_VOCABULARY
            .iter()
            .filter(|name| self.index.contains_key(**name))
            .copied()
            .collect()
    }

    /// Arithmetic mean of a column over all rows, skipping cells that do
    /// not parse as numbers. `None` when no cell parses.
    #[must_use]
    pub fn mean(&self, name: &str) -> Option<f64> {
        self.mean_over(name, 0..self.rows.len())
    }

    /// Arithmetic mean of a column over a row range, skip-missing.
    #[must_use]
    pub fn mean_over(&self, name: &str, range: Range<usize>) -> Option<f64> {
        let position = self.column_index(name)?;
        let mut sum = 0.0;
        let mut count = 0usize;
        for row in self.rows.get(range)? {
            if let Some(value) = row.get(position).and_then(|c| c.trim().parse::<f64>().ok()) {
                sum += value;
                count += 1;
            }
        }
        (count > 0).then(|| sum / count as f64)
    }
}

fn parse_datetime(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn write_csv(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let file = dir.child("data.csv");
        file.write_str(content).unwrap();
        let path = file.path().to_path_buf();
        (dir, path)
    }

    mod load {
        use super::*;

        #[test]
        fn normalizes_headers() {
            let (_dir, path) = write_csv(" Date ,PM25,City\n2025-01-01,65,Lahore\n");
            let dataset = Dataset::load(&path).unwrap();
            assert_eq!(dataset.columns(), ["date", "pm25", "city"]);
        }

        #[test]
        fn missing_file_is_load_error() {
            let err = Dataset::load(Path::new("/nonexistent/air.csv")).unwrap_err();
            assert!(matches!(err, AnalysisError::Load { .. }));
        }

        #[test]
        fn ragged_rows_are_load_error() {
            let (_dir, path) = write_csv("date,pm25\n2025-01-01,65\n2025-02-01\n");
            let err = Dataset::load(&path).unwrap_err();
            assert!(matches!(err, AnalysisError::Load { .. }));
        }

        #[test]
        fn duplicate_headers_last_wins() {
            let (_dir, path) = write_csv("pm25,pm25\n1,9\n3,11\n");
            let dataset = Dataset::load(&path).unwrap();
            assert_eq!(dataset.column_index("pm25"), Some(1));
            assert_eq!(dataset.mean("pm25"), Some(10.0));
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn first_candidate_wins() {
            let (_dir, path) = write_csv("timestamp,date\n2025-01-01,2025-02-01\n");
            let dataset = Dataset::load(&path).unwrap();
            assert_eq!(dataset.date_column(), Some("date"));
        }

        #[test]
        fn sorts_ascending_missing_last() {
            let (_dir, path) = write_csv(
                "date,pm25\n2025-07-01,44\nnot-a-date,99\n2025-01-01,65\n2025-03-01,58\n",
            );
            let dataset = Dataset::load(&path).unwrap();
            let first_cells: Vec<&str> =
                dataset.rows().iter().map(|r| r[0].as_str()).collect();
            assert_eq!(
                first_cells,
                ["2025-01-01", "2025-03-01", "2025-07-01", "not-a-date"]
            );
        }

        #[test]
        fn bounds_skip_unparseable() {
            let (_dir, path) = write_csv("date,pm25\nbogus,1\n2025-03-01,58\n2025-01-01,65\n");
            let dataset = Dataset::load(&path).unwrap();
            let (min, max) = dataset.date_bounds().unwrap();
            assert_eq!(min.date().to_string(), "2025-01-01");
            assert_eq!(max.date().to_string(), "2025-03-01");
        }

        #[test]
        fn accepts_multiple_formats() {
            assert!(parse_datetime("2025-01-02").is_some());
            assert!(parse_datetime("2025/01/02").is_some());
            assert!(parse_datetime("01/02/2025").is_some());
            assert!(parse_datetime("2025-01-02T10:30:00").is_some());
            assert!(parse_datetime("2025-01-02 10:30:00").is_some());
            assert!(parse_datetime("January 2, 2025").is_none());
        }

        #[test]
        fn no_date_column_keeps_load_order() {
            let (_dir, path) = write_csv("pm25,city\n65,Lahore\n58,Karachi\n");
            let dataset = Dataset::load(&path).unwrap();
            assert!(dataset.date_column().is_none());
            assert!(!dataset.has_parsed_dates());
            assert_eq!(dataset.rows()[0][1], "Lahore");
        }
    }

    mod means {
        use super::*;

        #[test]
        fn skips_non_numeric_cells() {
            let (_dir, path) = write_csv("pm25\n10\nn/a\n20\n");
            let dataset = Dataset::load(&path).unwrap();
            assert_eq!(dataset.mean("pm25"), Some(15.0));
        }

        #[test]
        fn all_non_numeric_is_none() {
            let (_dir, path) = write_csv("pm25\nlow\nhigh\n");
            let dataset = Dataset::load(&path).unwrap();
            assert_eq!(dataset.mean("pm25"), None);
        }

        #[test]
        fn mean_over_subrange() {
            let (_dir, path) = write_csv("pm25\n10\n20\n30\n40\n");
            let dataset = Dataset::load(&path).unwrap();
            assert_eq!(dataset.mean_over("pm25", 0..2), Some(15.0));
            assert_eq!(dataset.mean_over("pm25", 2..4), Some(35.0));
        }

        #[test]
        fn pollutants_in_vocabulary_order() {
            let (_dir, path) = write_csv("no2,pm10,pm25,humidity\n1,2,3,4\n");
            let dataset = Dataset::load(&path).unwrap();
            assert_eq!(dataset.pollutant_columns(), ["pm25", "pm10", "no2"]);
        }
    }
}
