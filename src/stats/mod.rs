//! Stats module - Score breakdown tables

mod calculator;

pub use calculator::{ScoreCalculator, ScoreSummary, SeriesSummary};
