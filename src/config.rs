//! Render Configuration
//! Options shared by the library and the CLI, loadable from JSON.

use crate::data::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DPI: u32 = 150;
pub const DEFAULT_FONT_SIZE: u32 = 10;
/// Upper bound keeping a 6in canvas under 3600x3600 pixels.
pub const MAX_DPI: u32 = 600;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// How a chart is drawn and written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Output resolution; the canvas is 6 x 6 inches.
    pub dpi: u32,
    /// Axis label size in points.
    pub font_size: u32,
    pub font_path: Option<PathBuf>,
    pub title: Option<String>,
    /// Fixed radial axis maximum instead of the data maximum.
    pub r_max: Option<f64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            font_size: DEFAULT_FONT_SIZE,
            font_path: None,
            title: None,
            r_max: None,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(ValidationError::InvalidOption {
                name: "dpi",
                reason: format!("must be between 1 and {MAX_DPI}, got {}", self.dpi),
            });
        }
        if self.font_size == 0 {
            return Err(ValidationError::InvalidOption {
                name: "font_size",
                reason: "must be positive".into(),
            });
        }
        if let Some(r_max) = self.r_max {
            if !r_max.is_finite() || r_max <= 0.0 {
                return Err(ValidationError::InvalidOption {
                    name: "r_max",
                    reason: format!("must be a positive number, got {r_max}"),
                });
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Canvas edge length in pixels.
    pub fn canvas_px(&self) -> u32 {
        6 * self.dpi
    }

    /// Convert a size in points to pixels at this resolution.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}
