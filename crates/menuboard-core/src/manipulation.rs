//! Direct manipulation: drag, resize, rotate, stacking order and nudge.
//!
//! Gestures are explicit start/update/end sequences. Every update writes
//! the computed transform straight into the registry, so releasing the
//! pointer always leaves the last computed state in place.
//!
//! Pointer positions are screen pixels; transforms are document pixels.
//! The scene's display scale converts between the two.

use crate::config::EditorConfig;
use crate::element::ElementId;
use crate::guides::{AlignmentGuide, DistanceBadge, alignment_guides, distance_badges};
use crate::handles::ResizeHandle;
use crate::registry::ElementRegistry;
use crate::scene::{Scene, sanitize_scale};
use crate::snap::{SnapResult, angle_from_pointer, snap_to_page};
use crate::transform::{Transform, TransformPatch, clamp_size};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Ids a gesture may act on: selected, registered, unlocked, visible and not
/// being edited. Selection order is kept.
pub fn targets(
    selection: &[ElementId],
    registry: &ElementRegistry,
    editing: Option<&ElementId>,
) -> Vec<ElementId> {
    selection
        .iter()
        .filter(|id| registry.is_transformable(id) && Some(*id) != editing)
        .cloned()
        .collect()
}

/// State of an active move of one or more elements.
#[derive(Debug, Clone)]
pub struct DragState {
    /// Starting point of the drag (screen).
    pub start_point: Point,
    /// Current point of the drag (screen).
    pub current_point: Point,
    /// Element whose snap correction is shared by all targets.
    pub primary: ElementId,
    /// Targets and their transforms at gesture start.
    pub originals: Vec<(ElementId, Transform)>,
    /// Screen bounds of the primary target at gesture start.
    start_bounds: Option<Rect>,
    /// Screen bounds of every visible, unselected element.
    others: Vec<Rect>,
    page: Rect,
    scale: f64,
}

impl DragState {
    /// Pointer delta in screen pixels.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.originals.iter().map(|(id, _)| id)
    }
}

/// State of an active resize of a single element.
#[derive(Debug, Clone)]
pub struct ResizeState {
    pub id: ElementId,
    pub handle: ResizeHandle,
    pub start_point: Point,
    pub current_point: Point,
    pub original: Transform,
    /// Document-space size at gesture start.
    pub start_size: Size,
    scale: f64,
}

/// State of an active rotation of a single element.
#[derive(Debug, Clone)]
pub struct RotateState {
    pub id: ElementId,
    /// Rotation pivot (screen), the element's center.
    pub center: Point,
    pub original: Transform,
}

/// The gesture in progress.
#[derive(Debug, Clone)]
pub enum Gesture {
    Drag(DragState),
    Resize(ResizeState),
    Rotate(RotateState),
}

impl Gesture {
    /// Ids the gesture is moving.
    pub fn ids(&self) -> Vec<&ElementId> {
        match self {
            Gesture::Drag(drag) => drag.ids().collect(),
            Gesture::Resize(resize) => vec![&resize.id],
            Gesture::Rotate(rotate) => vec![&rotate.id],
        }
    }
}

/// Visual feedback for one drag frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DragFeedback {
    /// Page snap applied to the primary target, in page-relative document
    /// coordinates.
    #[serde(skip)]
    pub snap: Option<SnapResult>,
    pub guides: Vec<AlignmentGuide>,
    pub badges: Vec<DistanceBadge>,
}

/// Stacking order change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZOrder {
    /// z + 1.
    Forward,
    /// z - 1, floored at 0.
    Backward,
    /// One above the highest z in the document.
    Front,
    /// z = 0.
    Back,
}

/// Apply a stacking change to one element. Returns the new z-index, or
/// `None` if the element is unknown.
pub fn apply_z_order(registry: &mut ElementRegistry, id: &ElementId, order: ZOrder) -> Option<u32> {
    if !registry.contains(id) {
        log::debug!("z-order on unknown element {id} ignored");
        return None;
    }
    let current = registry.z_index(id);
    let z = match order {
        ZOrder::Forward => current.saturating_add(1),
        ZOrder::Backward => current.saturating_sub(1),
        ZOrder::Front => registry.max_z_index().saturating_add(1),
        ZOrder::Back => 0,
    };
    registry.update_transform(id, &TransformPatch::z_index(z));
    Some(z)
}

pub fn bring_forward(registry: &mut ElementRegistry, id: &ElementId) -> Option<u32> {
    apply_z_order(registry, id, ZOrder::Forward)
}

pub fn send_backward(registry: &mut ElementRegistry, id: &ElementId) -> Option<u32> {
    apply_z_order(registry, id, ZOrder::Backward)
}

pub fn bring_to_front(registry: &mut ElementRegistry, id: &ElementId) -> Option<u32> {
    apply_z_order(registry, id, ZOrder::Front)
}

pub fn send_to_back(registry: &mut ElementRegistry, id: &ElementId) -> Option<u32> {
    apply_z_order(registry, id, ZOrder::Back)
}

/// Drives transform gestures against a registry.
#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    config: EditorConfig,
    gesture: Option<Gesture>,
}

impl TransformEngine {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            gesture: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    // --- drag ---

    /// Begin moving the transformable members of `selection`. Returns false
    /// when nothing can move.
    pub fn start_drag(
        &mut self,
        point: Point,
        selection: &[ElementId],
        registry: &ElementRegistry,
        scene: &dyn Scene,
        editing: Option<&ElementId>,
    ) -> bool {
        let ids = targets(selection, registry, editing);
        let Some(primary) = ids.first().cloned() else {
            log::debug!("drag start with no movable selection");
            return false;
        };

        let originals: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let transform = registry.transform(&id).copied().unwrap_or_default();
                (id, transform)
            })
            .collect();
        let others = scene
            .elements()
            .iter()
            .filter(|info| {
                registry.contains(&info.id)
                    && !registry.is_hidden(&info.id)
                    && !selection.contains(&info.id)
            })
            .map(|info| info.bounds)
            .collect();

        log::trace!("drag start: {} target(s), primary {primary}", originals.len());
        self.gesture = Some(Gesture::Drag(DragState {
            start_point: point,
            current_point: point,
            start_bounds: scene.bounds(&primary),
            primary,
            originals,
            others,
            page: scene.page_bounds(),
            scale: sanitize_scale(scene.display_scale()),
        }));
        true
    }

    /// Move the drag to `point`. Returns guides and badges for the primary
    /// target, or `None` if no drag is active.
    pub fn update_drag(&mut self, point: Point, registry: &mut ElementRegistry) -> Option<DragFeedback> {
        let Some(Gesture::Drag(drag)) = &mut self.gesture else {
            return None;
        };
        if !point.is_finite() {
            log::debug!("non-finite drag point ignored");
            return None;
        }
        drag.current_point = point;
        let mut delta = drag.delta() / drag.scale;
        let mut feedback = DragFeedback::default();

        if let Some(bounds) = drag.start_bounds {
            let page_size = Size::new(drag.page.width() / drag.scale, drag.page.height() / drag.scale);
            let page_position = Point::new(
                (bounds.x0 - drag.page.x0) / drag.scale + delta.x,
                (bounds.y0 - drag.page.y0) / drag.scale + delta.y,
            );
            let snap = snap_to_page(
                page_position,
                page_size,
                self.config.drag_snap_threshold,
                self.config.snap_vertical,
            );
            delta += snap.point - page_position;

            let dragged = bounds + delta * drag.scale;
            feedback.guides = alignment_guides(dragged, &drag.others, self.config.guide_threshold);
            feedback.badges = distance_badges(dragged, &drag.others, self.config.badge_threshold);
            feedback.snap = Some(snap);
        }

        // Targets locked or hidden since the drag started stay where they are.
        for (id, original) in drag.originals.iter() {
            if !registry.is_transformable(id) {
                continue;
            }
            let patch = TransformPatch::position(original.x + delta.x, original.y + delta.y);
            registry.update_transform(id, &patch);
        }
        log::trace!("drag to ({:.1}, {:.1}) doc delta ({:.1}, {:.1})", point.x, point.y, delta.x, delta.y);
        Some(feedback)
    }

    // --- resize ---

    /// Begin resizing `id` from `handle`. The starting size is the explicit
    /// transform size, else the rendered size.
    pub fn start_resize(
        &mut self,
        id: &ElementId,
        handle: ResizeHandle,
        point: Point,
        registry: &ElementRegistry,
        scene: &dyn Scene,
        editing: Option<&ElementId>,
    ) -> bool {
        if !registry.is_transformable(id) || Some(id) == editing {
            log::debug!("resize start on unavailable element {id} ignored");
            return false;
        }
        let scale = sanitize_scale(scene.display_scale());
        let original = registry.transform(id).copied().unwrap_or_default();
        let rendered = scene.bounds(id).map(|b| b.size() / scale);
        let start_size = match (original.width, original.height, rendered) {
            (Some(w), Some(h), _) => Size::new(w, h),
            (w, h, Some(size)) => Size::new(w.unwrap_or(size.width), h.unwrap_or(size.height)),
            (_, _, None) => {
                log::debug!("resize start on {id} without known size ignored");
                return false;
            }
        };

        log::trace!("resize start on {id} from {handle:?}");
        self.gesture = Some(Gesture::Resize(ResizeState {
            id: id.clone(),
            handle,
            start_point: point,
            current_point: point,
            original,
            start_size,
            scale,
        }));
        true
    }

    /// Set the absolute new size. Sizes are clamped to the configured
    /// minimum; the offset moves by the clamped size change so the opposite
    /// edge stays put on screen, also when the element is rotated about its
    /// center. Returns the written transform.
    pub fn update_resize(&mut self, size: Size, registry: &mut ElementRegistry) -> Option<Transform> {
        let Some(Gesture::Resize(resize)) = &self.gesture else {
            return None;
        };
        if !registry.is_transformable(&resize.id) {
            log::debug!("resize of unavailable element {} ignored", resize.id);
            return None;
        }
        let min = self.config.min_element_size;
        let width = clamp_size(size.width, min);
        let height = clamp_size(size.height, min);
        let delta = Vec2::new(width - resize.start_size.width, height - resize.start_size.height);

        // Center shift in the element frame, rotated back into the document.
        let local = Vec2::new(
            if resize.handle.moves_left() { -delta.x } else { delta.x },
            if resize.handle.moves_top() { -delta.y } else { delta.y },
        ) / 2.0;
        let (sin_r, cos_r) = resize.original.rotation().to_radians().sin_cos();
        let center_shift = Vec2::new(local.x * cos_r - local.y * sin_r, local.x * sin_r + local.y * cos_r);
        let offset = center_shift - delta / 2.0;

        let mut patch = TransformPatch::size(width, height);
        patch.x = Some(resize.original.x + offset.x);
        patch.y = Some(resize.original.y + offset.y);

        registry.update_transform(&resize.id, &patch);
        registry.transform(&resize.id).copied()
    }

    /// Resize from a pointer position. The pointer delta is taken in the
    /// element's rotated frame and only along the axes the handle controls.
    pub fn resize_to_pointer(&mut self, point: Point, registry: &mut ElementRegistry) -> Option<Transform> {
        let Some(Gesture::Resize(resize)) = &mut self.gesture else {
            return None;
        };
        if !point.is_finite() {
            log::debug!("non-finite resize point ignored");
            return None;
        }
        resize.current_point = point;

        let screen = point - resize.start_point;
        let (sin_r, cos_r) = (-resize.original.rotation()).to_radians().sin_cos();
        let local = Vec2::new(
            screen.x * cos_r - screen.y * sin_r,
            screen.x * sin_r + screen.y * cos_r,
        ) / resize.scale;

        let handle = resize.handle;
        let mut size = resize.start_size;
        if handle.affects_width() {
            size.width += if handle.moves_left() { -local.x } else { local.x };
        }
        if handle.affects_height() {
            size.height += if handle.moves_top() { -local.y } else { local.y };
        }
        self.update_resize(size, registry)
    }

    // --- rotate ---

    pub fn start_rotate(
        &mut self,
        id: &ElementId,
        registry: &ElementRegistry,
        scene: &dyn Scene,
        editing: Option<&ElementId>,
    ) -> bool {
        if !registry.is_transformable(id) || Some(id) == editing {
            log::debug!("rotate start on unavailable element {id} ignored");
            return false;
        }
        let Some(bounds) = scene.bounds(id) else {
            log::debug!("rotate start on unrendered element {id} ignored");
            return false;
        };
        log::trace!("rotate start on {id}");
        self.gesture = Some(Gesture::Rotate(RotateState {
            id: id.clone(),
            center: bounds.center(),
            original: registry.transform(id).copied().unwrap_or_default(),
        }));
        true
    }

    /// Overwrite the rotation with an absolute angle in degrees. Non-finite
    /// angles keep the previous value. Returns the angle now in effect.
    pub fn update_rotate(&mut self, degrees: f64, registry: &mut ElementRegistry) -> Option<f64> {
        let Some(Gesture::Rotate(rotate)) = &self.gesture else {
            return None;
        };
        if !registry.is_transformable(&rotate.id) {
            log::debug!("rotation of unavailable element {} ignored", rotate.id);
            return None;
        }
        if degrees.is_finite() {
            registry.update_transform(&rotate.id, &TransformPatch::rotate(degrees));
        } else {
            log::debug!("non-finite rotation {degrees} ignored");
        }
        registry.transform(&rotate.id).map(Transform::rotation)
    }

    /// Rotate so the element's top points at `point`; `snap` rounds to the
    /// configured increment.
    pub fn rotate_to_pointer(&mut self, point: Point, snap: bool, registry: &mut ElementRegistry) -> Option<f64> {
        let Some(Gesture::Rotate(rotate)) = &self.gesture else {
            return None;
        };
        let increment = snap.then_some(self.config.rotation_snap_degrees);
        let angle = angle_from_pointer(rotate.center, point, increment);
        self.update_rotate(angle, registry)
    }

    // --- gesture lifecycle ---

    /// Route a pointer move to whichever gesture is active. Only drags
    /// produce feedback.
    pub fn update_pointer(&mut self, point: Point, snap_rotation: bool, registry: &mut ElementRegistry) -> Option<DragFeedback> {
        match self.gesture {
            Some(Gesture::Drag(_)) => self.update_drag(point, registry),
            Some(Gesture::Resize(_)) => {
                self.resize_to_pointer(point, registry);
                None
            }
            Some(Gesture::Rotate(_)) => {
                self.rotate_to_pointer(point, snap_rotation, registry);
                None
            }
            None => None,
        }
    }

    /// Finish the active gesture. The registry already holds its last frame.
    pub fn end(&mut self) -> Option<Gesture> {
        let gesture = self.gesture.take();
        if let Some(gesture) = &gesture {
            log::trace!("gesture end on {} element(s)", gesture.ids().len());
        }
        gesture
    }

    // --- keyboard ---

    /// Move every target by `delta` (document pixels). Locked and hidden
    /// members are skipped. Returns how many elements moved.
    pub fn nudge(
        &self,
        delta: Vec2,
        selection: &[ElementId],
        registry: &mut ElementRegistry,
        editing: Option<&ElementId>,
    ) -> usize {
        let ids = targets(selection, registry, editing);
        for id in &ids {
            let current = registry.transform(id).copied().unwrap_or_default();
            registry.update_transform(id, &TransformPatch::position(current.x + delta.x, current.y + delta.y));
        }
        ids.len()
    }

    /// Apply a stacking change to every target.
    pub fn reorder(
        &self,
        order: ZOrder,
        selection: &[ElementId],
        registry: &mut ElementRegistry,
        editing: Option<&ElementId>,
    ) -> usize {
        let ids = targets(selection, registry, editing);
        for id in &ids {
            apply_z_order(registry, id, order);
        }
        ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementInfo, TextRole};
    use crate::guides::{GuideAnchor, GuideAxis};
    use crate::handles::{Corner, Edge};
    use crate::scene::StaticScene;

    fn id(s: &str) -> ElementId {
        ElementId::from(s)
    }

    fn scene(scale: f64) -> StaticScene {
        let r = |x0: f64, y0: f64, x1: f64, y1: f64| Rect::new(x0 * scale, y0 * scale, x1 * scale, y1 * scale);
        StaticScene::new(r(0.0, 0.0, 600.0, 800.0))
            .with_scale(scale)
            .with_element(ElementInfo::text("a", TextRole::Body, r(100.0, 100.0, 200.0, 130.0), "A"))
            .with_element(ElementInfo::text("b", TextRole::Body, r(300.0, 100.0, 400.0, 130.0), "B"))
            .with_element(ElementInfo::text("c", TextRole::Body, r(100.0, 300.0, 200.0, 330.0), "C"))
    }

    fn registry_for(scene: &StaticScene) -> ElementRegistry {
        let mut registry = ElementRegistry::new();
        registry.sync_elements(scene.elements.clone());
        registry
    }

    fn position(registry: &ElementRegistry, s: &str) -> (f64, f64) {
        registry.transform(&id(s)).map_or((0.0, 0.0), |t| (t.x, t.y))
    }

    #[test]
    fn test_drag_moves_by_delta() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        assert!(engine.start_drag(Point::new(150.0, 115.0), &[id("a")], &registry, &scene, None));
        engine.update_drag(Point::new(170.0, 125.0), &mut registry);
        assert_eq!(position(&registry, "a"), (20.0, 10.0));
        assert!(registry.transform(&id("b")).is_none());
    }

    #[test]
    fn test_drag_divides_by_scale() {
        let scene = scene(2.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_drag(Point::new(300.0, 230.0), &[id("a")], &registry, &scene, None);
        engine.update_drag(Point::new(340.0, 250.0), &mut registry);
        assert_eq!(position(&registry, "a"), (20.0, 10.0));
    }

    #[test]
    fn test_drag_snaps_to_page_left() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_drag(Point::new(150.0, 115.0), &[id("a")], &registry, &scene, None);
        // Left edge lands at 5, within 8 of the page's left edge.
        let feedback = engine.update_drag(Point::new(55.0, 115.0), &mut registry).unwrap();
        assert_eq!(position(&registry, "a"), (-100.0, 0.0));
        assert!(feedback.snap.unwrap().snapped_x);
    }

    #[test]
    fn test_vertical_not_snapped_by_default() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_drag(Point::new(150.0, 115.0), &[id("a")], &registry, &scene, None);
        // Top edge lands at 3.
        engine.update_drag(Point::new(150.0, 18.0), &mut registry);
        assert_eq!(position(&registry, "a"), (0.0, -97.0));

        let config = EditorConfig {
            snap_vertical: true,
            ..EditorConfig::default()
        };
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::new(config);
        engine.start_drag(Point::new(150.0, 115.0), &[id("a")], &registry, &scene, None);
        engine.update_drag(Point::new(150.0, 18.0), &mut registry);
        assert_eq!(position(&registry, "a"), (0.0, -100.0));
    }

    #[test]
    fn test_multi_drag_shares_primary_snap() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_drag(Point::new(150.0, 115.0), &[id("a"), id("b")], &registry, &scene, None);
        engine.update_drag(Point::new(55.0, 115.0), &mut registry);
        assert_eq!(position(&registry, "a"), (-100.0, 0.0));
        assert_eq!(position(&registry, "b"), (-100.0, 0.0));
    }

    #[test]
    fn test_drag_skips_locked_and_editing() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        registry.set_locked(&id("b"), true);
        let mut engine = TransformEngine::default();
        let selection = [id("a"), id("b"), id("c")];
        engine.start_drag(Point::new(150.0, 115.0), &selection, &registry, &scene, Some(&id("c")));
        engine.update_drag(Point::new(170.0, 115.0), &mut registry);
        assert_eq!(position(&registry, "a"), (20.0, 0.0));
        assert!(registry.transform(&id("b")).is_none());
        assert!(registry.transform(&id("c")).is_none());

        assert!(!engine.start_drag(Point::ZERO, &[id("b")], &registry, &scene, None));
    }

    #[test]
    fn test_drag_feedback_guides_and_badges() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_drag(Point::new(150.0, 115.0), &[id("a")], &registry, &scene, None);
        // a now spans y 250..280; c starts at y 300.
        let feedback = engine.update_drag(Point::new(150.0, 265.0), &mut registry).unwrap();

        assert!(feedback
            .guides
            .iter()
            .any(|g| g.axis == GuideAxis::Vertical && g.anchor == GuideAnchor::Left && g.position == 100.0));
        let badge = feedback
            .badges
            .iter()
            .find(|b| b.axis == GuideAxis::Vertical)
            .expect("vertical badge");
        assert!((badge.distance - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_end_keeps_last_frame() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_drag(Point::new(150.0, 115.0), &[id("a")], &registry, &scene, None);
        engine.update_drag(Point::new(160.0, 115.0), &mut registry);
        engine.update_drag(Point::new(175.0, 120.0), &mut registry);
        assert!(matches!(engine.end(), Some(Gesture::Drag(_))));
        assert!(!engine.is_active());
        assert_eq!(position(&registry, "a"), (25.0, 5.0));
        assert!(engine.update_drag(Point::ZERO, &mut registry).is_none());
    }

    #[test]
    fn test_drag_ignores_non_finite_point() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_drag(Point::new(150.0, 115.0), &[id("a")], &registry, &scene, None);
        engine.update_drag(Point::new(170.0, 125.0), &mut registry);
        assert!(engine.update_drag(Point::new(f64::NAN, 260.0), &mut registry).is_none());
        assert!(engine.update_drag(Point::new(170.0, f64::INFINITY), &mut registry).is_none());
        assert_eq!(position(&registry, "a"), (20.0, 10.0));
        assert!(engine.is_active());
    }

    #[test]
    fn test_drag_stops_moving_target_locked_midway() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_drag(Point::new(150.0, 115.0), &[id("a"), id("b")], &registry, &scene, None);
        engine.update_drag(Point::new(160.0, 115.0), &mut registry);

        registry.set_locked(&id("a"), true);
        registry.set_hidden(&id("b"), true);
        engine.update_drag(Point::new(190.0, 140.0), &mut registry);
        assert_eq!(position(&registry, "a"), (10.0, 0.0));
        assert_eq!(position(&registry, "b"), (10.0, 0.0));
    }

    #[test]
    fn test_resize_and_rotate_stop_on_locked_target() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        let handle = ResizeHandle::Edge(Edge::Right);
        engine.start_resize(&id("a"), handle, Point::new(200.0, 115.0), &registry, &scene, None);
        registry.set_locked(&id("a"), true);
        assert!(engine.update_resize(Size::new(150.0, 30.0), &mut registry).is_none());
        assert!(registry.transform(&id("a")).is_none());

        engine.end();
        engine.start_rotate(&id("b"), &registry, &scene, None);
        registry.set_hidden(&id("b"), true);
        assert!(engine.update_rotate(30.0, &mut registry).is_none());
        assert!(registry.transform(&id("b")).is_none());
    }

    #[test]
    fn test_resize_ignores_non_finite_point() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        let handle = ResizeHandle::Corner(Corner::BottomRight);
        engine.start_resize(&id("a"), handle, Point::new(200.0, 130.0), &registry, &scene, None);
        engine.resize_to_pointer(Point::new(220.0, 140.0), &mut registry);
        assert!(engine.resize_to_pointer(Point::new(f64::NAN, 140.0), &mut registry).is_none());
        let t = registry.transform(&id("a")).unwrap();
        assert_eq!((t.width, t.height), (Some(120.0), Some(40.0)));
    }

    #[test]
    fn test_resize_rotated_keeps_opposite_edge() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        registry.update_transform(&id("a"), &TransformPatch::rotate(90.0));
        // Natural box of a: origin (100, 100), 100 x 30.
        let left_middle = |t: &Transform, width: f64, height: f64| {
            let pivot = Point::new(100.0 + width / 2.0, 100.0 + height / 2.0);
            t.to_affine(pivot) * Point::new(100.0, 100.0 + height / 2.0)
        };
        let before = left_middle(&registry.transform(&id("a")).copied().unwrap(), 100.0, 30.0);

        let mut engine = TransformEngine::default();
        let handle = ResizeHandle::Edge(Edge::Right);
        engine.start_resize(&id("a"), handle, Point::new(150.0, 165.0), &registry, &scene, None);
        let t = engine.update_resize(Size::new(150.0, 30.0), &mut registry).unwrap();
        assert!((t.x + 25.0).abs() < 1e-9);
        assert!((t.y - 25.0).abs() < 1e-9);

        let after = left_middle(&t, 150.0, 30.0);
        assert!((after - before).hypot() < 1e-9);
    }

    #[test]
    fn test_resize_left_anchors_right_edge() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        let handle = ResizeHandle::Edge(Edge::Left);
        assert!(engine.start_resize(&id("a"), handle, Point::new(100.0, 115.0), &registry, &scene, None));

        let t = engine.update_resize(Size::new(150.0, 30.0), &mut registry).unwrap();
        assert_eq!(t.width, Some(150.0));
        assert_eq!(t.x, -50.0);
        assert_eq!(t.y, 0.0);
    }

    #[test]
    fn test_resize_clamps_and_anchors_clamped() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        let handle = ResizeHandle::Corner(Corner::TopLeft);
        engine.start_resize(&id("a"), handle, Point::new(100.0, 100.0), &registry, &scene, None);

        let t = engine.update_resize(Size::new(3.0, f64::NAN), &mut registry).unwrap();
        assert_eq!(t.width, Some(10.0));
        assert_eq!(t.height, Some(10.0));
        assert_eq!(t.x, 90.0);
        assert_eq!(t.y, 20.0);
    }

    #[test]
    fn test_resize_from_pointer() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        let handle = ResizeHandle::Corner(Corner::BottomRight);
        engine.start_resize(&id("a"), handle, Point::new(200.0, 130.0), &registry, &scene, None);
        engine.update_pointer(Point::new(220.0, 140.0), false, &mut registry);
        let t = registry.transform(&id("a")).unwrap();
        assert_eq!((t.width, t.height), (Some(120.0), Some(40.0)));
        assert_eq!((t.x, t.y), (0.0, 0.0));

        // Edge handles only change their own axis.
        engine.end();
        engine.start_resize(&id("a"), ResizeHandle::Edge(Edge::Right), Point::new(220.0, 120.0), &registry, &scene, None);
        engine.update_pointer(Point::new(230.0, 500.0), false, &mut registry);
        let t = registry.transform(&id("a")).unwrap();
        assert_eq!((t.width, t.height), (Some(130.0), Some(40.0)));
    }

    #[test]
    fn test_resize_refuses_locked() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        registry.set_locked(&id("a"), true);
        let mut engine = TransformEngine::default();
        let handle = ResizeHandle::Edge(Edge::Right);
        assert!(!engine.start_resize(&id("a"), handle, Point::ZERO, &registry, &scene, None));
        assert!(engine.update_resize(Size::new(50.0, 50.0), &mut registry).is_none());
    }

    #[test]
    fn test_rotate_overwrites_and_ignores_nan() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        assert!(engine.start_rotate(&id("a"), &registry, &scene, None));
        assert_eq!(engine.update_rotate(30.0, &mut registry), Some(30.0));
        assert_eq!(engine.update_rotate(45.0, &mut registry), Some(45.0));
        assert_eq!(engine.update_rotate(f64::NAN, &mut registry), Some(45.0));
    }

    #[test]
    fn test_rotate_to_pointer() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let mut engine = TransformEngine::default();
        engine.start_rotate(&id("a"), &registry, &scene, None);
        // Center of a is (150, 115).
        let angle = engine.rotate_to_pointer(Point::new(250.0, 115.0), false, &mut registry).unwrap();
        assert!((angle - 90.0).abs() < 1e-9);
        let snapped = engine.rotate_to_pointer(Point::new(250.0, 120.0), true, &mut registry).unwrap();
        assert!((snapped - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_forward_then_backward_restores() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let a = id("a");
        assert_eq!(bring_forward(&mut registry, &a), Some(1));
        assert_eq!(send_backward(&mut registry, &a), Some(0));
        assert_eq!(send_backward(&mut registry, &a), Some(0));
        assert_eq!(registry.z_index(&a), 0);
    }

    #[test]
    fn test_front_and_back() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        registry.update_transform(&id("a"), &TransformPatch::z_index(4));
        assert_eq!(bring_to_front(&mut registry, &id("b")), Some(5));
        assert_eq!(registry.layer_list()[0], id("b"));
        assert_eq!(send_to_back(&mut registry, &id("b")), Some(0));
        assert_eq!(bring_forward(&mut registry, &id("ghost")), None);
    }

    #[test]
    fn test_nudge_skips_locked_members() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        registry.set_locked(&id("b"), true);
        let engine = TransformEngine::default();
        let moved = engine.nudge(Vec2::new(10.0, 0.0), &[id("a"), id("b")], &mut registry, None);
        assert_eq!(moved, 1);
        assert_eq!(position(&registry, "a"), (10.0, 0.0));
        assert!(registry.transform(&id("b")).is_none());
    }

    #[test]
    fn test_nudge_accumulates() {
        let scene = scene(1.0);
        let mut registry = registry_for(&scene);
        let engine = TransformEngine::default();
        engine.nudge(Vec2::new(1.0, 0.0), &[id("a")], &mut registry, None);
        engine.nudge(Vec2::new(0.0, -1.0), &[id("a")], &mut registry, None);
        assert_eq!(position(&registry, "a"), (1.0, -1.0));
    }
}
