//! Charts module - Radar geometry, fonts and rendering

pub mod font;
pub mod geometry;
mod renderer;

pub use font::{resolve_font, FontResolution, FontWarning, LabelFont};
pub use geometry::{
    close_loop, label_alignment, label_layout, radar_angles, radial_max, HAlign, LabelPlacement,
    VAlign,
};
pub use renderer::{Figure, RadarChartBuilder, RenderError, PALETTE};
