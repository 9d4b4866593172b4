//! The contract the rendering layer fulfils for the core.
//!
//! The core never inspects a live UI tree. Everything it needs about what is
//! on screen (rendered units and their boxes, the page frame, the display
//! scale, hit-testing) comes through [`Scene`].

use crate::element::{ElementId, ElementInfo};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// View of the rendered page, supplied by the rendering layer.
pub trait Scene {
    /// Every rendered unit, in paint order (back to front).
    fn elements(&self) -> &[ElementInfo];

    /// The page/frame box in screen space; reference for drag snapping.
    fn page_bounds(&self) -> Rect;

    /// Screen pixels per document pixel.
    fn display_scale(&self) -> f64;

    /// Ids under `point` (screen space), topmost first.
    fn hit_test(&self, point: Point) -> Vec<ElementId>;

    /// Bounds of one rendered unit.
    fn bounds(&self, id: &ElementId) -> Option<Rect> {
        self.elements()
            .iter()
            .find(|info| &info.id == id)
            .map(|info| info.bounds)
    }

    /// Page size in document space.
    fn page_size(&self) -> Size {
        let scale = sanitize_scale(self.display_scale());
        let page = self.page_bounds();
        Size::new(page.width() / scale, page.height() / scale)
    }
}

/// Replace a zero, negative or non-finite scale with 1.
pub fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        log::debug!("invalid display scale {scale}, using 1.0");
        1.0
    }
}

/// In-memory scene: a fixed list of rendered units.
///
/// Hit-testing walks the list back to front against each unit's bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticScene {
    pub elements: Vec<ElementInfo>,
    pub page: Rect,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl StaticScene {
    /// Create a scene with a page box and scale 1.
    pub fn new(page: Rect) -> Self {
        Self {
            elements: Vec::new(),
            page,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Append a unit on top of the others.
    pub fn push(&mut self, info: ElementInfo) {
        self.elements.push(info);
    }

    pub fn with_element(mut self, info: ElementInfo) -> Self {
        self.push(info);
        self
    }

    /// Update a unit's bounds after a re-render.
    pub fn set_bounds(&mut self, id: &ElementId, bounds: Rect) {
        if let Some(info) = self.elements.iter_mut().find(|info| &info.id == id) {
            info.bounds = bounds;
        }
    }
}

impl Scene for StaticScene {
    fn elements(&self) -> &[ElementInfo] {
        &self.elements
    }

    fn page_bounds(&self) -> Rect {
        self.page
    }

    fn display_scale(&self) -> f64 {
        self.scale
    }

    fn hit_test(&self, point: Point) -> Vec<ElementId> {
        self.elements
            .iter()
            .rev()
            .filter(|info| info.bounds.contains(point))
            .map(|info| info.id.clone())
            .collect()
    }
}
