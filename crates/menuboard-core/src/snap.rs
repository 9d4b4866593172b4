//! Snapping of dragged positions to page reference lines and of angles to
//! fixed increments.

use kurbo::{Point, Size};

/// Distance threshold for page snapping (document pixels).
pub const PAGE_SNAP_THRESHOLD: f64 = 8.0;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap one coordinate to the nearest of `0`, `extent / 2` and `extent`
/// when it is strictly closer than `threshold`.
pub fn snap_axis(value: f64, extent: f64, threshold: f64) -> Option<f64> {
    [0.0, extent / 2.0, extent]
        .into_iter()
        .map(|line| (line, (value - line).abs()))
        .filter(|&(_, dist)| dist < threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(line, _)| line)
}

/// Snap a position to the page's start, middle and end lines.
///
/// Only x snaps unless `snap_vertical` is set.
pub fn snap_to_page(position: Point, page: Size, threshold: f64, snap_vertical: bool) -> SnapResult {
    let mut result = SnapResult::none(position);

    if let Some(x) = snap_axis(position.x, page.width, threshold) {
        result.point.x = x;
        result.snapped_x = true;
    }
    if snap_vertical {
        if let Some(y) = snap_axis(position.y, page.height, threshold) {
            result.point.y = y;
            result.snapped_y = true;
        }
    }

    result
}

/// Snap an angle to the nearest increment.
/// Returns the snapped angle in degrees (0-360).
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    let snapped = (angle_degrees / increment).round() * increment;
    snapped.rem_euclid(360.0)
}

/// Absolute rotation (degrees, 0 = pointing up, clockwise) of the line from
/// `center` to `pointer`.
pub fn angle_from_pointer(center: Point, pointer: Point, snap: Option<f64>) -> f64 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    // Offset so 0° is up
    let angle = (dy.atan2(dx).to_degrees() + 90.0).rem_euclid(360.0);
    match snap {
        Some(increment) if increment > 0.0 => snap_angle(angle, increment),
        _ => angle,
    }
}
