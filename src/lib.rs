//! Takken Radar - exam score radar charts
//!
//! Loads per-subject scores from CSV (or builds them in memory), renders them
//! as overlaid radar polygons and summarizes totals against full marks.

pub mod charts;
pub mod config;
pub mod data;
pub mod stats;

pub use charts::{Figure, RadarChartBuilder, RenderError};
pub use config::RenderOptions;
pub use data::{DataLoader, LoaderError, RadarData, Series, ValidationError};
pub use stats::{ScoreCalculator, ScoreSummary};
