//! Radar Data Model
//! Validated category labels and the score series aligned to them.

use std::collections::HashSet;
use thiserror::Error;

/// Minimum number of categories that still forms a polygon.
pub const MIN_CATEGORIES: usize = 3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("At least 3 categories are required, got {0}")]
    TooFewCategories(usize),
    #[error("Duplicate category label: {0:?}")]
    DuplicateLabel(String),
    #[error("At least one series is required")]
    NoSeries,
    #[error("Series {series:?} has {actual} values but there are {expected} categories")]
    LengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },
    #[error("Series {series:?}, category {category:?}: {value:?} is not a number")]
    NonNumeric {
        series: String,
        category: String,
        value: String,
    },
    #[error("Series {series:?}, category {category:?}: value {value} must be finite and non-negative")]
    OutOfRange {
        series: String,
        category: String,
        value: f64,
    },
    #[error("Invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

/// Placeholder legend name for the series at `index` (0-based).
pub fn placeholder_name(index: usize) -> String {
    format!("series_{}", index + 1)
}

/// One polygon worth of values, one per category.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: Option<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(values: Vec<f64>) -> Self {
        Self { name: None, values }
    }

    pub fn named(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: Some(name.into()),
            values,
        }
    }

    /// Name shown in the legend and in error messages.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => placeholder_name(index),
        }
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Categories plus aligned series. Only constructible through validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarData {
    labels: Vec<String>,
    series: Vec<Series>,
}

impl RadarData {
    pub fn new(labels: Vec<String>, series: Vec<Series>) -> Result<Self, ValidationError> {
        if labels.len() < MIN_CATEGORIES {
            return Err(ValidationError::TooFewCategories(labels.len()));
        }

        {
            let mut seen = HashSet::with_capacity(labels.len());
            for label in &labels {
                if !seen.insert(label.as_str()) {
                    return Err(ValidationError::DuplicateLabel(label.clone()));
                }
            }
        }

        if series.is_empty() {
            return Err(ValidationError::NoSeries);
        }

        for (idx, s) in series.iter().enumerate() {
            if s.values.len() != labels.len() {
                return Err(ValidationError::LengthMismatch {
                    series: s.display_name(idx),
                    expected: labels.len(),
                    actual: s.values.len(),
                });
            }
            for (label, &value) in labels.iter().zip(&s.values) {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::OutOfRange {
                        series: s.display_name(idx),
                        category: label.clone(),
                        value,
                    });
                }
            }
        }

        Ok(Self { labels, series })
    }

    /// Build a single unnamed series from an ordered label -> value snapshot.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (labels, values): (Vec<String>, Vec<f64>) =
            pairs.into_iter().map(|(l, v)| (l.into(), v)).unzip();
        Self::new(labels, vec![Series::new(values)])
    }

    /// The 宅建 exam subjects with full marks, a target and a self-graded score.
    pub fn takken_sample() -> Self {
        let labels = ["権利関係", "法令上の制限", "税・その他", "宅建業法", "免除科目"]
            .into_iter()
            .map(String::from)
            .collect();
        Self {
            labels,
            series: vec![
                Series::named("満点", vec![14.0, 8.0, 3.0, 20.0, 5.0]),
                Series::named("目標", vec![10.0, 6.0, 2.0, 18.0, 5.0]),
                Series::named("自己採点", vec![8.0, 5.0, 1.0, 15.0, 4.0]),
            ],
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn category_count(&self) -> usize {
        self.labels.len()
    }

    /// Largest value across every series, or 0.0.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Legend entries, or `None` when no series carries a name.
    pub fn legend_entries(&self) -> Option<Vec<String>> {
        let any_named = self
            .series
            .iter()
            .any(|s| s.name.as_deref().is_some_and(|n| !n.is_empty()));
        if !any_named {
            return None;
        }
        Some(
            self.series
                .iter()
                .enumerate()
                .map(|(i, s)| s.display_name(i))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_length_mismatch_naming_series() {
        let err = RadarData::new(
            labels(&["A", "B", "C"]),
            vec![Series::new(vec![1.0, 2.0])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                series: "series_1".into(),
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_too_few_and_duplicate_labels() {
        assert_eq!(
            RadarData::new(labels(&["A", "B"]), vec![Series::new(vec![1.0, 2.0])]),
            Err(ValidationError::TooFewCategories(2))
        );
        assert_eq!(
            RadarData::new(
                labels(&["A", "B", "A"]),
                vec![Series::new(vec![1.0, 2.0, 3.0])]
            ),
            Err(ValidationError::DuplicateLabel("A".into()))
        );
    }

    #[test]
    fn rejects_negative_and_nan() {
        let err = RadarData::new(
            labels(&["A", "B", "C"]),
            vec![Series::named("mine", vec![1.0, -2.0, 3.0])],
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref series, .. } if series == "mine"));

        let err = RadarData::new(
            labels(&["A", "B", "C"]),
            vec![Series::new(vec![1.0, f64::NAN, 3.0])],
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn legend_substitutes_placeholder_names() {
        let data = RadarData::new(
            labels(&["A", "B", "C"]),
            vec![
                Series::new(vec![1.0, 2.0, 3.0]),
                Series::named("Target", vec![3.0, 2.0, 1.0]),
            ],
        )
        .unwrap();
        assert_eq!(
            data.legend_entries(),
            Some(vec!["series_1".to_string(), "Target".to_string()])
        );
    }

    #[test]
    fn legend_absent_without_names() {
        let data = RadarData::from_pairs([("A", 1.0), ("B", 2.0), ("C", 3.0)]).unwrap();
        assert_eq!(data.legend_entries(), None);
        assert_eq!(data.max_value(), 3.0);
    }

    #[test]
    fn sample_is_valid() {
        let sample = RadarData::takken_sample();
        let rebuilt =
            RadarData::new(sample.labels().to_vec(), sample.series().to_vec()).unwrap();
        assert_eq!(rebuilt, sample);
        assert_eq!(sample.series()[0].total(), 50.0);
    }
}
