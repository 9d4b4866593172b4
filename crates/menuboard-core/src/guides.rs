//! Alignment guides and distance badges shown while dragging.
//!
//! Pure geometry over screen-space rectangles. Nothing here knows about
//! elements; callers pass the dragged rect and the candidate rects.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default alignment threshold in pixels.
pub const GUIDE_THRESHOLD: f64 = 8.0;
/// Default maximum gap for distance badges, in pixels.
pub const BADGE_THRESHOLD: f64 = 30.0;
/// Gaps at or below this are "touching" and produce no badge.
pub const TOUCH_GAP: f64 = 2.0;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    /// A vertical line at some x.
    Vertical,
    /// A horizontal line at some y.
    Horizontal,
}

/// Which reference lines matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAnchor {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// One alignment match between the dragged rect and a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGuide {
    pub axis: GuideAxis,
    pub anchor: GuideAnchor,
    /// Position of the line on the candidate (x for vertical, y for horizontal).
    pub position: f64,
    /// The dragged rect's matching coordinate.
    pub dragged_position: f64,
    /// Extent of the line along its axis, spanning both rects.
    pub start: f64,
    pub end: f64,
}

/// A spacing hint between the dragged rect and a nearby candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBadge {
    pub axis: GuideAxis,
    /// Gap in pixels.
    pub distance: f64,
    /// Label position, at the midpoint of the gap.
    pub position: Point,
}

/// Test left/center/right and top/middle/bottom of `dragged` against every
/// candidate. One entry per match; duplicates across candidates are kept.
pub fn alignment_guides(dragged: Rect, others: &[Rect], threshold: f64) -> Vec<AlignmentGuide> {
    let mut guides = Vec::new();
    let dragged_center = dragged.center();

    for other in others {
        let other_center = other.center();
        let span_y = (dragged.y0.min(other.y0), dragged.y1.max(other.y1));
        let span_x = (dragged.x0.min(other.x0), dragged.x1.max(other.x1));

        let vertical = [
            (GuideAnchor::Left, dragged.x0, other.x0),
            (GuideAnchor::Center, dragged_center.x, other_center.x),
            (GuideAnchor::Right, dragged.x1, other.x1),
        ];
        for (anchor, mine, theirs) in vertical {
            if (mine - theirs).abs() < threshold {
                guides.push(AlignmentGuide {
                    axis: GuideAxis::Vertical,
                    anchor,
                    position: theirs,
                    dragged_position: mine,
                    start: span_y.0,
                    end: span_y.1,
                });
            }
        }

        let horizontal = [
            (GuideAnchor::Top, dragged.y0, other.y0),
            (GuideAnchor::Middle, dragged_center.y, other_center.y),
            (GuideAnchor::Bottom, dragged.y1, other.y1),
        ];
        for (anchor, mine, theirs) in horizontal {
            if (mine - theirs).abs() < threshold {
                guides.push(AlignmentGuide {
                    axis: GuideAxis::Horizontal,
                    anchor,
                    position: theirs,
                    dragged_position: mine,
                    start: span_x.0,
                    end: span_x.1,
                });
            }
        }
    }

    guides
}

/// Badges for the minimal horizontal and vertical gap to each candidate,
/// emitted only when `TOUCH_GAP < gap < threshold`.
pub fn distance_badges(dragged: Rect, others: &[Rect], threshold: f64) -> Vec<DistanceBadge> {
    let mut badges = Vec::new();

    for other in others {
        // Horizontal gap: candidate entirely to the right or left.
        let horizontal = if other.x0 >= dragged.x1 {
            Some((other.x0 - dragged.x1, dragged.x1, other.x0))
        } else if dragged.x0 >= other.x1 {
            Some((dragged.x0 - other.x1, other.x1, dragged.x0))
        } else {
            None
        };
        if let Some((gap, from, to)) = horizontal {
            if gap > TOUCH_GAP && gap < threshold {
                let y = overlap_mid(dragged.y0, dragged.y1, other.y0, other.y1);
                badges.push(DistanceBadge {
                    axis: GuideAxis::Horizontal,
                    distance: gap,
                    position: Point::new((from + to) / 2.0, y),
                });
            }
        }

        // Vertical gap: candidate entirely below or above.
        let vertical = if other.y0 >= dragged.y1 {
            Some((other.y0 - dragged.y1, dragged.y1, other.y0))
        } else if dragged.y0 >= other.y1 {
            Some((dragged.y0 - other.y1, other.y1, dragged.y0))
        } else {
            None
        };
        if let Some((gap, from, to)) = vertical {
            if gap > TOUCH_GAP && gap < threshold {
                let x = overlap_mid(dragged.x0, dragged.x1, other.x0, other.x1);
                badges.push(DistanceBadge {
                    axis: GuideAxis::Vertical,
                    distance: gap,
                    position: Point::new(x, (from + to) / 2.0),
                });
            }
        }
    }

    badges
}

/// Midpoint of the overlap of two intervals, or of the gap between them when
/// they do not overlap.
fn overlap_mid(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a0.max(b0) + a1.min(b1)) / 2.0
}
