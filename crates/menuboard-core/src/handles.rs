//! Manipulation handles drawn around the primary selection.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 10.0;
/// Distance from the top edge to the rotation handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Direction a resize gesture was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    Corner(Corner),
    Edge(Edge),
}

impl ResizeHandle {
    /// The left edge moves with this handle (right edge anchored).
    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Edge(Edge::Left)
                | ResizeHandle::Corner(Corner::TopLeft | Corner::BottomLeft)
        )
    }

    /// The top edge moves with this handle (bottom edge anchored).
    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Edge(Edge::Top)
                | ResizeHandle::Corner(Corner::TopLeft | Corner::TopRight)
        )
    }

    /// Whether the handle changes width.
    pub fn affects_width(&self) -> bool {
        !matches!(self, ResizeHandle::Edge(Edge::Top | Edge::Bottom))
    }

    /// Whether the handle changes height.
    pub fn affects_height(&self) -> bool {
        !matches!(self, ResizeHandle::Edge(Edge::Left | Edge::Right))
    }
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    Resize(ResizeHandle),
    Rotate,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in screen coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Corner, edge and rotation handles for a box rotated by `rotation_degrees`
/// about its center.
pub fn get_handles(bounds: Rect, rotation_degrees: f64) -> Vec<Handle> {
    let center = bounds.center();
    let half_w = bounds.width() / 2.0;
    let half_h = bounds.height() / 2.0;
    let (sin_r, cos_r) = rotation_degrees.to_radians().sin_cos();

    let rotate_point = |dx: f64, dy: f64| -> Point {
        Point::new(
            center.x + dx * cos_r - dy * sin_r,
            center.y + dx * sin_r + dy * cos_r,
        )
    };
    let resize = HandleKind::Resize;

    vec![
        Handle::new(rotate_point(-half_w, -half_h), resize(ResizeHandle::Corner(Corner::TopLeft))),
        Handle::new(rotate_point(half_w, -half_h), resize(ResizeHandle::Corner(Corner::TopRight))),
        Handle::new(rotate_point(-half_w, half_h), resize(ResizeHandle::Corner(Corner::BottomLeft))),
        Handle::new(rotate_point(half_w, half_h), resize(ResizeHandle::Corner(Corner::BottomRight))),
        Handle::new(rotate_point(0.0, -half_h), resize(ResizeHandle::Edge(Edge::Top))),
        Handle::new(rotate_point(half_w, 0.0), resize(ResizeHandle::Edge(Edge::Right))),
        Handle::new(rotate_point(0.0, half_h), resize(ResizeHandle::Edge(Edge::Bottom))),
        Handle::new(rotate_point(-half_w, 0.0), resize(ResizeHandle::Edge(Edge::Left))),
        Handle::new(rotate_point(0.0, -half_h - ROTATE_HANDLE_OFFSET), HandleKind::Rotate),
    ]
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(bounds: Rect, rotation_degrees: f64, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(bounds, rotation_degrees)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_positions_unrotated() {
        let handles = get_handles(Rect::new(0.0, 0.0, 100.0, 50.0), 0.0);
        assert_eq!(handles.len(), 9);
        let rotate = handles.iter().find(|h| h.kind == HandleKind::Rotate).unwrap();
        assert!((rotate.position.x - 50.0).abs() < 1e-9);
        assert!((rotate.position.y + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_corner() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let hit = hit_test_handles(bounds, 0.0, Point::new(98.0, 52.0), HANDLE_HIT_TOLERANCE);
        assert_eq!(hit, Some(HandleKind::Resize(ResizeHandle::Corner(Corner::BottomRight))));
        assert_eq!(hit_test_handles(bounds, 0.0, Point::new(30.0, 25.0), HANDLE_HIT_TOLERANCE), None);
    }

    #[test]
    fn test_rotated_handles_follow_rotation() {
        // 90° clockwise: the top-left corner swings to the top-right.
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let handles = get_handles(bounds, 90.0);
        let top_left = handles[0].position;
        assert!((top_left.x - 100.0).abs() < 1e-9);
        assert!((top_left.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_handle_sides() {
        let tl = ResizeHandle::Corner(Corner::TopLeft);
        assert!(tl.moves_left() && tl.moves_top());
        let br = ResizeHandle::Corner(Corner::BottomRight);
        assert!(!br.moves_left() && !br.moves_top());
        let top = ResizeHandle::Edge(Edge::Top);
        assert!(top.moves_top() && !top.affects_width() && top.affects_height());
        let right = ResizeHandle::Edge(Edge::Right);
        assert!(right.affects_width() && !right.affects_height());
    }
}
