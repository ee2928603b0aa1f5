//! Radar Geometry
//! Axis angles, closed polygons, radial scaling and label alignment.
//!
//! Angles here are category angles: index 0 is 0 rad and angles grow
//! clockwise when drawn, with 0 rad at the top of the chart.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Extra radius, relative to the radial maximum, where axis labels sit.
pub const LABEL_RADIUS_FACTOR: f64 = 1.08;

/// Number of grid rings between the centre and the radial maximum.
pub const GRID_RINGS: usize = 4;

/// Horizontal text anchor: which side of the text touches the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text anchor: which edge of the text touches the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A point in chart polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    pub angle: f64,
    pub radius: f64,
}

/// Evenly spaced category angles in radians, `2*pi*i/n`.
pub fn radar_angles(n: usize) -> Vec<f64> {
    (0..n).map(|i| TAU * i as f64 / n as f64).collect()
}

/// Repeat the first element at the end so the last edge gets drawn.
pub fn close_loop<T: Clone>(points: &[T]) -> Vec<T> {
    let mut closed = Vec::with_capacity(points.len() + 1);
    closed.extend_from_slice(points);
    if let Some(first) = points.first() {
        closed.push(first.clone());
    }
    closed
}

/// Closed (angle, radius) loop for one series.
pub fn series_loop(values: &[f64], angles: &[f64]) -> Vec<PolarPoint> {
    let points: Vec<PolarPoint> = angles
        .iter()
        .zip(values)
        .map(|(&angle, &radius)| PolarPoint { angle, radius })
        .collect();
    close_loop(&points)
}

/// Radial axis maximum: the override when given, else the largest value,
/// else 1.0 so the axis never collapses to zero.
pub fn radial_max(max_value: f64, fixed: Option<f64>) -> f64 {
    if let Some(fixed) = fixed {
        return fixed;
    }
    if max_value > 0.0 {
        max_value
    } else {
        1.0
    }
}

/// Values of the grid rings, outermost last.
pub fn grid_levels(r_max: f64) -> Vec<f64> {
    (1..=GRID_RINGS)
        .map(|k| r_max * k as f64 / GRID_RINGS as f64)
        .collect()
}

/// Text alignment for a label at `theta_deg`, measured counter-clockwise
/// from the positive x axis as seen on screen.
///
/// Callers pass the screen angle ([`screen_angle_deg`]), not the category
/// angle.
pub fn label_alignment(theta_deg: f64) -> (HAlign, VAlign) {
    let theta = theta_deg.rem_euclid(360.0);
    if theta > 80.0 && theta < 100.0 {
        (HAlign::Center, VAlign::Bottom)
    } else if theta > 260.0 && theta < 280.0 {
        (HAlign::Center, VAlign::Top)
    } else if theta <= 80.0 || theta >= 280.0 {
        (HAlign::Left, VAlign::Center)
    } else {
        (HAlign::Right, VAlign::Center)
    }
}

/// Screen angle in degrees (counter-clockwise from +x) of a category angle.
pub fn screen_angle_deg(category_angle: f64) -> f64 {
    (FRAC_PI_2 - category_angle).to_degrees().rem_euclid(360.0)
}

/// Pixel position of a polar point on a chart of pixel radius `radius_px`
/// centred at `center`. Radii beyond `r_max` are clipped to the rim.
pub fn to_pixel(point: PolarPoint, r_max: f64, center: (f64, f64), radius_px: f64) -> (i32, i32) {
    let r = (point.radius / r_max).clamp(0.0, 1.0) * radius_px;
    offset_pixel(point.angle, r, center)
}

/// Pixel position at `r` pixels from `center` along a category angle.
pub fn offset_pixel(angle: f64, r: f64, center: (f64, f64)) -> (i32, i32) {
    let phi = FRAC_PI_2 - angle;
    let x = center.0 + r * phi.cos();
    let y = center.1 - r * phi.sin();
    (x.round() as i32, y.round() as i32)
}

/// Where an axis label is drawn and which side of the text touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPlacement {
    pub anchor: (i32, i32),
    pub align: (HAlign, VAlign),
}

/// Label placements for every axis, at [`LABEL_RADIUS_FACTOR`] times the
/// chart radius so the text reads outward from the rim.
pub fn label_layout(angles: &[f64], center: (f64, f64), radius_px: f64) -> Vec<LabelPlacement> {
    angles
        .iter()
        .map(|&angle| LabelPlacement {
            anchor: offset_pixel(angle, radius_px * LABEL_RADIUS_FACTOR, center),
            align: label_alignment(screen_angle_deg(angle)),
        })
        .collect()
}

/// Compact number formatting for ring labels.
pub fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
