//! Data Processor Module
//! Turns a grid of CSV cells into validated radar data.

use crate::data::loader::LoaderError;
use crate::data::model::{placeholder_name, RadarData, Series, ValidationError};
use tracing::debug;

/// Shape of a score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// Header row plus one `label,value` row per category.
    Pairs,
    /// Header row of categories plus one row per series.
    Wide,
}

/// Handles layout detection and value parsing.
pub struct DataProcessor;

impl DataProcessor {
    /// Detect which layout a grid uses.
    pub fn detect_layout(rows: &[Vec<String>]) -> Result<TableLayout, LoaderError> {
        if rows.len() < 2 {
            return Err(LoaderError::Format(
                "CSV must have at least a header row and one data row".into(),
            ));
        }
        let header = &rows[0];
        if header.len() == 2 && rows.iter().all(|row| row.len() >= 2) {
            Ok(TableLayout::Pairs)
        } else if header.len() >= 2 {
            Ok(TableLayout::Wide)
        } else {
            Err(LoaderError::Format(
                "use either (Category,Value) rows or a header of categories plus one row per series"
                    .into(),
            ))
        }
    }

    /// Convert a grid into radar data.
    pub fn rows_to_radar(rows: &[Vec<String>]) -> Result<RadarData, LoaderError> {
        let layout = Self::detect_layout(rows)?;
        debug!(?layout, rows = rows.len(), "detected table layout");
        let data = match layout {
            TableLayout::Pairs => Self::pairs(rows)?,
            TableLayout::Wide => Self::wide(rows)?,
        };
        Ok(data)
    }

    fn pairs(rows: &[Vec<String>]) -> Result<RadarData, ValidationError> {
        let name = Some(rows[0][1].trim().to_string()).filter(|n| !n.is_empty());
        let series_label = name.clone().unwrap_or_else(|| placeholder_name(0));

        let mut labels = Vec::with_capacity(rows.len() - 1);
        let mut values = Vec::with_capacity(rows.len() - 1);
        for row in &rows[1..] {
            let label = row[0].trim().to_string();
            values.push(Self::parse_value(&row[1], &series_label, &label)?);
            labels.push(label);
        }

        RadarData::new(labels, vec![Series { name, values }])
    }

    fn wide(rows: &[Vec<String>]) -> Result<RadarData, ValidationError> {
        let labels: Vec<String> = rows[0][1..].iter().map(|l| l.trim().to_string()).collect();

        let mut series = Vec::with_capacity(rows.len() - 1);
        for (idx, row) in rows[1..].iter().enumerate() {
            let name = row
                .first()
                .map(|cell| cell.trim().to_string())
                .filter(|n| !n.is_empty());
            let series_label = name.clone().unwrap_or_else(|| placeholder_name(idx));

            let cells = row.get(1..).unwrap_or_default();
            let values = labels
                .iter()
                .enumerate()
                .map(|(i, label)| match cells.get(i) {
                    Some(cell) => Self::parse_value(cell, &series_label, label),
                    None => Ok(0.0),
                })
                .collect::<Result<Vec<f64>, _>>()?;

            series.push(Series { name, values });
        }

        RadarData::new(labels, series)
    }

    /// Parse one score cell. Only an empty cell counts as zero; a cell of
    /// nothing but whitespace is rejected like any other non-number.
    pub fn parse_value(cell: &str, series: &str, category: &str) -> Result<f64, ValidationError> {
        if cell.is_empty() {
            return Ok(0.0);
        }
        match cell.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ValidationError::NonNumeric {
                series: series.to_string(),
                category: category.to_string(),
                value: cell.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn pairs_layout_uses_header_as_series_name() {
        let rows = grid(&[
            &["Category", "Max"],
            &["A", "14"],
            &["B", "8"],
            &["C", ""],
        ]);
        assert_eq!(DataProcessor::detect_layout(&rows).unwrap(), TableLayout::Pairs);
        let data = DataProcessor::rows_to_radar(&rows).unwrap();
        assert_eq!(data.labels(), ["A", "B", "C"]);
        assert_eq!(data.series()[0].name.as_deref(), Some("Max"));
        assert_eq!(data.series()[0].values, vec![14.0, 8.0, 0.0]);
    }

    #[test]
    fn wide_layout_pads_missing_values_and_ignores_extras() {
        let rows = grid(&[
            &["", "A", "B", "C"],
            &["", "1", "2"],
            &["Target", "3", "2", "1", "99"],
        ]);
        assert_eq!(DataProcessor::detect_layout(&rows).unwrap(), TableLayout::Wide);
        let data = DataProcessor::rows_to_radar(&rows).unwrap();
        assert_eq!(data.series()[0].name, None);
        assert_eq!(data.series()[0].values, vec![1.0, 2.0, 0.0]);
        assert_eq!(data.series()[1].values, vec![3.0, 2.0, 1.0]);
        assert_eq!(
            data.legend_entries(),
            Some(vec!["series_1".to_string(), "Target".to_string()])
        );
    }

    #[test]
    fn short_row_in_two_column_file_switches_to_wide() {
        let rows = grid(&[&["Category", "Value"], &["A"], &["B", "2"]]);
        assert_eq!(DataProcessor::detect_layout(&rows).unwrap(), TableLayout::Wide);
        // A single category cannot form a polygon.
        assert!(matches!(
            DataProcessor::rows_to_radar(&rows),
            Err(LoaderError::Validation(ValidationError::TooFewCategories(1)))
        ));
    }

    #[test]
    fn non_numeric_cell_names_series_and_category() {
        let rows = grid(&[&["name", "A", "B", "C"], &["mine", "1", "two", "3"]]);
        let err = DataProcessor::rows_to_radar(&rows).unwrap_err();
        match err {
            LoaderError::Validation(ValidationError::NonNumeric {
                series,
                category,
                value,
            }) => {
                assert_eq!(series, "mine");
                assert_eq!(category, "B");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn single_row_is_a_format_error() {
        let rows = grid(&[&["A", "B", "C"]]);
        assert!(matches!(
            DataProcessor::rows_to_radar(&rows),
            Err(LoaderError::Format(_))
        ));
    }

    #[test]
    fn infinity_is_not_a_score() {
        assert!(DataProcessor::parse_value("inf", "s", "c").is_err());
        assert_eq!(DataProcessor::parse_value(" 2.5 ", "s", "c").unwrap(), 2.5);
    }

    #[test]
    fn whitespace_only_cell_is_not_zero() {
        assert_eq!(DataProcessor::parse_value("", "s", "c").unwrap(), 0.0);
        assert_eq!(
            DataProcessor::parse_value("  ", "mine", "B"),
            Err(ValidationError::NonNumeric {
                series: "mine".into(),
                category: "B".into(),
                value: "  ".into(),
            })
        );
    }
}
