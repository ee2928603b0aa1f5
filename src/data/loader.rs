//! CSV Data Loader Module
//! Reads score CSV files into a grid of text cells.

use crate::data::model::{RadarData, ValidationError};
use crate::data::processor::DataProcessor;
use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Unsupported CSV format: {0}")]
    Format(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Handles CSV loading. Every cell is kept as text; numbers are parsed later
/// so that bad cells can be reported with their series and category.
pub struct DataLoader;

impl DataLoader {
    /// Load and interpret a CSV file.
    pub fn load_csv(path: &Path) -> Result<RadarData, LoaderError> {
        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read csv");
        Self::parse_bytes(&bytes)
    }

    /// Interpret CSV content already in memory.
    pub fn parse_bytes(bytes: &[u8]) -> Result<RadarData, LoaderError> {
        let rows = Self::read_rows(bytes)?;
        DataProcessor::rows_to_radar(&rows)
    }

    /// Split CSV content into rows of cells. Each row keeps the number of
    /// cells it was written with; rows whose cells are all empty are dropped.
    pub fn read_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, LoaderError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(LoaderError::Format(
                "CSV must have at least a header row and one data row".into(),
            ));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        let mut width = 0;
        for record in reader.records() {
            let record = record?;
            if is_blank(&record) {
                continue;
            }
            width = width.max(record.len());
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        debug!(rows = rows.len(), width, "parsed csv grid");
        Ok(rows)
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_keep_their_length() {
        let rows = DataLoader::read_rows(b"name,A,B,C\nmine,1,2\nx\n").unwrap();
        assert_eq!(rows[0], vec!["name", "A", "B", "C"]);
        assert_eq!(rows[1], vec!["mine", "1", "2"]);
        assert_eq!(rows[2], vec!["x"]);
    }

    #[test]
    fn empty_cells_stay_empty_strings() {
        let rows = DataLoader::read_rows(b"Category,Value\nA,\nB,3\n").unwrap();
        assert_eq!(rows[1], vec!["A", ""]);
    }

    #[test]
    fn blank_and_comma_only_rows_are_dropped() {
        let rows = DataLoader::read_rows(b"Category,Value\nA,1\n\n,\nB,2\n").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["Category", "Value"],
                vec!["A", "1"],
                vec!["B", "2"],
            ]
        );
    }

    #[test]
    fn bom_is_stripped() {
        let rows = DataLoader::read_rows("\u{feff}Category,Value\nA,1\n".as_bytes()).unwrap();
        assert_eq!(rows[0][0], "Category");
    }

    #[test]
    fn empty_input_is_a_format_error() {
        assert!(matches!(
            DataLoader::read_rows(b"  \n"),
            Err(LoaderError::Format(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DataLoader::load_csv(Path::new("/nonexistent/scores.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scores.csv"));
    }
}
