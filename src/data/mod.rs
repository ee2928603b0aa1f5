//! Data module - CSV loading, layout detection and the radar data model

mod loader;
mod model;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use model::{placeholder_name, RadarData, Series, ValidationError, MIN_CATEGORIES};
pub use processor::{DataProcessor, TableLayout};
