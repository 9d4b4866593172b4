//! Selection and hover state.
//!
//! Turns clicks and pointer movement into selection/hover changes. The
//! selection is ordered; its first member is the primary selection that
//! carries handles and drives guides.

use crate::element::ElementId;
use crate::registry::ElementRegistry;
use crate::scene::Scene;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Coarse selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Empty,
    Single,
    Multi,
}

/// Tracks selected and hovered elements.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    /// Selected ids in selection order; first is primary.
    selected: Vec<ElementId>,
    hovered: Option<ElementId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        match self.selected.len() {
            0 => SelectionMode::Empty,
            1 => SelectionMode::Single,
            _ => SelectionMode::Multi,
        }
    }

    pub fn selected(&self) -> &[ElementId] {
        &self.selected
    }

    pub fn primary(&self) -> Option<&ElementId> {
        self.selected.first()
    }

    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn hovered(&self) -> Option<&ElementId> {
        self.hovered.as_ref()
    }

    /// Click on an element. Without `additive` the element becomes the only
    /// selection; with it, its membership toggles.
    ///
    /// Unknown and hidden ids are ignored.
    pub fn click(&mut self, id: &ElementId, additive: bool, registry: &ElementRegistry) {
        if !Self::selectable(id, registry) {
            log::debug!("click on unavailable element {id} ignored");
            return;
        }
        if additive {
            self.toggle(id);
        } else {
            self.replace(id);
        }
    }

    /// Make `id` the only selection. Unknown and hidden ids are ignored.
    pub fn select(&mut self, id: &ElementId, registry: &ElementRegistry) {
        if !Self::selectable(id, registry) {
            log::debug!("select of unavailable element {id} ignored");
            return;
        }
        self.replace(id);
    }

    fn selectable(id: &ElementId, registry: &ElementRegistry) -> bool {
        registry.contains(id) && !registry.is_hidden(id)
    }

    fn replace(&mut self, id: &ElementId) {
        self.selected.clear();
        self.selected.push(id.clone());
    }

    fn toggle(&mut self, id: &ElementId) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.clone());
        }
    }

    /// Remove `id` from the selection, if present.
    pub fn deselect(&mut self, id: &ElementId) {
        self.selected.retain(|s| s != id);
    }

    /// Click on empty canvas.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Select every rendered, visible element (flat, in paint order).
    pub fn select_all(&mut self, scene: &dyn Scene, registry: &ElementRegistry) {
        self.selected = scene
            .elements()
            .iter()
            .map(|info| &info.id)
            .filter(|id| registry.contains(id) && !registry.is_hidden(id))
            .cloned()
            .collect();
    }

    /// Recompute hover from the pointer position: the topmost registered,
    /// visible element under it, or none.
    pub fn update_hover(&mut self, point: Point, scene: &dyn Scene, registry: &ElementRegistry) {
        self.hovered = scene
            .hit_test(point)
            .into_iter()
            .find(|id| registry.contains(id) && !registry.is_hidden(id));
    }

    /// Set hover directly. Hidden or unknown ids clear it.
    pub fn set_hovered(&mut self, id: Option<ElementId>, registry: &ElementRegistry) {
        self.hovered = id.filter(|id| registry.contains(id) && !registry.is_hidden(id));
    }

    /// Keep only the selected ids matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&ElementId) -> bool) {
        self.selected.retain(|id| keep(id));
    }

    /// Drop ids the registry no longer backs, and hover on hidden elements.
    pub fn prune(&mut self, registry: &ElementRegistry) {
        self.retain(|id| registry.contains(id));
        if let Some(hovered) = &self.hovered {
            if !registry.contains(hovered) || registry.is_hidden(hovered) {
                self.hovered = None;
            }
        }
    }

    /// Forget everything (document navigation).
    pub fn reset(&mut self) {
        self.selected.clear();
        self.hovered = None;
    }
}
