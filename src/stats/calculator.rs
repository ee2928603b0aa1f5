//! Score Calculator Module
//! Totals, achievement ratios and pass-line checks for each series.

use crate::data::RadarData;
use serde::Serialize;

/// Per-series score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub name: String,
    pub total: f64,
    /// Total as a percentage of the reference total.
    pub percent: f64,
    /// Value / category reference for each category, 0 when the reference is 0.
    pub category_ratios: Vec<f64>,
    /// Present only when a pass line was supplied.
    pub passed: Option<bool>,
}

/// Breakdown of every series against the per-category maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub categories: Vec<String>,
    /// Highest value seen in each category across all series.
    pub category_reference: Vec<f64>,
    pub reference_total: f64,
    pub pass_line: Option<f64>,
    pub series: Vec<SeriesSummary>,
}

impl ScoreSummary {
    /// Plain-text table: one row per series, one column per category.
    pub fn to_table(&self) -> String {
        let name_w = self
            .series
            .iter()
            .map(|s| s.name.chars().count())
            .chain(std::iter::once("series".len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        out.push_str(&format!("{:<name_w$}", "series"));
        for category in &self.categories {
            out.push_str(&format!(" | {category}"));
        }
        out.push_str(" | total | %");
        if self.pass_line.is_some() {
            out.push_str(" | pass");
        }
        out.push('\n');

        for s in &self.series {
            let pad = name_w.saturating_sub(s.name.chars().count());
            out.push_str(&s.name);
            out.push_str(&" ".repeat(pad));
            for ratio in &s.category_ratios {
                out.push_str(&format!(" | {:.0}%", ratio * 100.0));
            }
            out.push_str(&format!(" | {} | {:.1}", trim_number(s.total), s.percent));
            if let Some(passed) = s.passed {
                out.push_str(if passed { " | yes" } else { " | no" });
            }
            out.push('\n');
        }
        out
    }
}

fn trim_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

/// Computes score summaries.
pub struct ScoreCalculator;

impl ScoreCalculator {
    pub fn summarize(data: &RadarData, pass_line: Option<f64>) -> ScoreSummary {
        let n = data.category_count();
        let category_reference: Vec<f64> = (0..n)
            .map(|i| {
                data.series()
                    .iter()
                    .map(|s| s.values[i])
                    .fold(0.0, f64::max)
            })
            .collect();
        let reference_total: f64 = category_reference.iter().sum();

        let series = data
            .series()
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                let total = s.total();
                SeriesSummary {
                    name: s.display_name(idx),
                    total,
                    percent: Self::ratio(total * 100.0, reference_total),
                    category_ratios: s
                        .values
                        .iter()
                        .zip(&category_reference)
                        .map(|(&v, &r)| Self::ratio(v, r))
                        .collect(),
                    passed: pass_line.map(|line| total >= line),
                }
            })
            .collect();

        ScoreSummary {
            categories: data.labels().to_vec(),
            category_reference,
            reference_total,
            pass_line,
            series,
        }
    }

    fn ratio(value: f64, reference: f64) -> f64 {
        if reference > 0.0 {
            value / reference
        } else {
            0.0
        }
    }
}
