//! Radar Chart Renderer
//! Draws score polygons over a polar grid and writes PNG images.
//!
//! Layout on a square 6in canvas:
//! 1. Title centred at the top (optional)
//! 2. Legend in the top-left corner (when any series is named)
//! 3. Polar grid: rings, spokes and ring values along the top spoke
//! 4. One translucent polygon per series, later series on top
//! 5. Category labels just outside the outer ring

use crate::charts::font::{draw_text_aligned, resolve_font, FontResolution, FontWarning, LabelFont};
use crate::charts::geometry::{
    format_tick, grid_levels, label_layout, offset_pixel, radar_angles, radial_max, series_loop,
    to_pixel, HAlign, VAlign,
};
use crate::config::RenderOptions;
use crate::data::{RadarData, Series, ValidationError};
use image::{ImageFormat, Rgb, RgbImage};
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const BACKGROUND: RGBColor = RGBColor(255, 255, 255);
const TEXT: RGBColor = RGBColor(0, 0, 0);
const GRID: RGBColor = RGBColor(200, 200, 200);
const RIM: RGBColor = RGBColor(120, 120, 120);
const TICK_TEXT: RGBColor = RGBColor(110, 110, 110);

/// Series colours, cycled in input order.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Grey
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

const FILL_ALPHA: f64 = 0.15;
const OUTLINE_PT: f64 = 2.0;
/// Chart radius as a fraction of the canvas edge.
const CHART_RADIUS: f64 = 0.32;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// A rendered chart held in memory.
#[derive(Debug, Clone)]
pub struct Figure {
    image: RgbImage,
    dpi: u32,
    legend: Option<Vec<String>>,
    radial_max: f64,
    warnings: Vec<FontWarning>,
}

impl Figure {
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Legend entries drawn on the chart, if a legend was drawn.
    pub fn legend(&self) -> Option<&[String]> {
        self.legend.as_deref()
    }

    pub fn radial_max(&self) -> f64 {
        self.radial_max
    }

    /// Font problems encountered while rendering.
    pub fn warnings(&self) -> &[FontWarning] {
        &self.warnings
    }

    /// Encode as PNG into memory.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Write a PNG to `path`. The image goes to a temporary file next to the
    /// target first and is renamed into place, so a failed write never
    /// leaves a truncated file behind.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let bytes = self.to_png_bytes()?;
        let io_err = |source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(&bytes).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;

        info!(path = %path.display(), bytes = bytes.len(), "saved chart");
        Ok(())
    }
}

/// Text queued during layout and drawn by whichever font is active.
struct TextItem {
    text: String,
    anchor: (i32, i32),
    align: (HAlign, VAlign),
    size_px: f64,
    color: RGBColor,
}

/// Builds radar charts from validated data.
#[derive(Debug, Clone, Default)]
pub struct RadarChartBuilder {
    options: RenderOptions,
}

impl RadarChartBuilder {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Validate raw labels and series, then build.
    pub fn build_from(
        &self,
        labels: Vec<String>,
        series: Vec<Series>,
    ) -> Result<Figure, RenderError> {
        let data = RadarData::new(labels, series)?;
        self.build(&data)
    }

    /// Resolve the label font and render.
    pub fn build(&self, data: &RadarData) -> Result<Figure, RenderError> {
        self.options.validate()?;
        let font = resolve_font(self.options.font_path.as_deref());
        self.build_with_font(data, font)
    }

    /// Render and save to `path`. Nothing is written if validation fails.
    pub fn render_to_file(&self, data: &RadarData, path: &Path) -> Result<Figure, RenderError> {
        let figure = self.build(data)?;
        figure.save(path)?;
        Ok(figure)
    }

    /// Render with an already resolved font.
    pub fn build_with_font(
        &self,
        data: &RadarData,
        resolution: FontResolution,
    ) -> Result<Figure, RenderError> {
        self.options.validate()?;
        let FontResolution {
            font,
            mut warnings,
        } = resolution;

        let size = self.options.canvas_px();
        let edge = size as f64;
        let r_max = radial_max(data.max_value(), self.options.r_max);
        let legend = data.legend_entries();
        debug!(
            categories = data.category_count(),
            series = data.series().len(),
            r_max,
            size,
            ?font,
            "rendering radar chart"
        );

        let title_offset = if self.options.title.is_some() { 0.03 } else { 0.0 };
        let center = (edge / 2.0, edge / 2.0 + edge * title_offset);
        let radius_px = edge * CHART_RADIUS;
        let label_px = self.options.points_to_px(self.options.font_size as f64);
        let angles = radar_angles(data.category_count());

        let mut texts = Vec::new();

        if let Some(title) = &self.options.title {
            texts.push(TextItem {
                text: title.clone(),
                anchor: ((edge / 2.0) as i32, (edge * 0.03) as i32),
                align: (HAlign::Center, VAlign::Top),
                size_px: label_px * 1.4,
                color: TEXT,
            });
        }

        // Ring values along the top spoke.
        for level in grid_levels(r_max) {
            let (x, y) = offset_pixel(0.0, level / r_max * radius_px, center);
            texts.push(TextItem {
                text: format_tick(level),
                anchor: (x + (label_px * 0.3) as i32, y),
                align: (HAlign::Left, VAlign::Center),
                size_px: label_px * 0.8,
                color: TICK_TEXT,
            });
        }

        for (placement, label) in label_layout(&angles, center, radius_px)
            .into_iter()
            .zip(data.labels())
        {
            texts.push(TextItem {
                text: label.clone(),
                anchor: placement.anchor,
                align: placement.align,
                size_px: label_px,
                color: TEXT,
            });
        }

        let swatch = label_px.max(4.0) as i32;
        let legend_origin = ((edge * 0.03) as i32, (edge * 0.08) as i32);
        if let Some(entries) = &legend {
            for (i, name) in entries.iter().enumerate() {
                let y = legend_origin.1 + i as i32 * (swatch * 3 / 2);
                texts.push(TextItem {
                    text: name.clone(),
                    anchor: (legend_origin.0 + swatch * 3 / 2, y + swatch / 2),
                    align: (HAlign::Left, VAlign::Center),
                    size_px: label_px,
                    color: TEXT,
                });
            }
        }

        let mut buffer = vec![0u8; size as usize * size as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (size, size)).into_drawing_area();
            root.fill(&BACKGROUND).map_err(draw_err)?;

            let (cx, cy) = (center.0.round() as i32, center.1.round() as i32);
            let levels = grid_levels(r_max);
            for (i, level) in levels.iter().enumerate() {
                let r = (level / r_max * radius_px).round() as i32;
                let color = if i + 1 == levels.len() { RIM } else { GRID };
                root.draw(&Circle::new((cx, cy), r, color.stroke_width(1)))
                    .map_err(draw_err)?;
            }
            for &angle in &angles {
                let tip = offset_pixel(angle, radius_px, center);
                root.draw(&PathElement::new(vec![(cx, cy), tip], GRID.stroke_width(1)))
                    .map_err(draw_err)?;
            }

            let outline = self.options.points_to_px(OUTLINE_PT).round().max(1.0) as u32;
            for (idx, series) in data.series().iter().enumerate() {
                let color = PALETTE[idx % PALETTE.len()];
                let points: Vec<(i32, i32)> = series_loop(&series.values, &angles)
                    .into_iter()
                    .map(|p| to_pixel(p, r_max, center, radius_px))
                    .collect();
                root.draw(&Polygon::new(points.clone(), color.mix(FILL_ALPHA).filled()))
                    .map_err(draw_err)?;
                root.draw(&PathElement::new(points, color.stroke_width(outline)))
                    .map_err(draw_err)?;
            }

            if let Some(entries) = &legend {
                for i in 0..entries.len() {
                    let color = PALETTE[i % PALETTE.len()];
                    let x = legend_origin.0;
                    let y = legend_origin.1 + i as i32 * (swatch * 3 / 2);
                    root.draw(&Rectangle::new([(x, y), (x + swatch, y + swatch)], color.filled()))
                        .map_err(draw_err)?;
                }
            }

            if matches!(font, LabelFont::System) {
                for item in &texts {
                    let style = (FontFamily::SansSerif, item.size_px)
                        .into_font()
                        .color(&item.color)
                        .pos(to_pos(item.align));
                    if let Err(e) = root.draw(&Text::new(item.text.as_str(), item.anchor, style)) {
                        let w = FontWarning::SystemFontUnavailable(e.to_string());
                        warn!("{w}");
                        warnings.push(w);
                        break;
                    }
                }
            }

            root.present().map_err(draw_err)?;
        }

        let mut image = RgbImage::from_raw(size, size, buffer)
            .ok_or_else(|| RenderError::Draw("pixel buffer size mismatch".into()))?;

        if let LabelFont::File { font, .. } = &font {
            for item in &texts {
                draw_text_aligned(
                    &mut image,
                    font,
                    item.size_px as f32,
                    &item.text,
                    item.anchor,
                    item.align,
                    Rgb([item.color.0, item.color.1, item.color.2]),
                );
            }
        }

        Ok(Figure {
            image,
            dpi: self.options.dpi,
            legend,
            radial_max: r_max,
            warnings,
        })
    }
}

fn to_pos((h, v): (HAlign, VAlign)) -> Pos {
    let h = match h {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match v {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    Pos::new(h, v)
}
