//! Element registry: the in-memory document store.
//!
//! Holds the table of rendered elements plus one sparse layer per concern
//! (transform, style override, lock, hidden, edited text), all keyed by
//! [`ElementId`]. Layers are created lazily on first mutation. Every mutation
//! on an id the registry does not know is a silent no-op: UI state can race
//! ahead of a render pass.

use crate::element::{ElementId, ElementInfo, TextRole};
use crate::style::{RoleStyleTable, StyleField, TextStyle};
use crate::transform::{Transform, TransformPatch};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Document store for one menu.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    /// Rendered elements, keyed by id.
    elements: HashMap<ElementId, ElementInfo>,
    /// Paint order of `elements` (back to front).
    order: Vec<ElementId>,
    /// Ids deleted from this document; never accepted again.
    retired: HashSet<ElementId>,
    transforms: HashMap<ElementId, Transform>,
    style_overrides: HashMap<ElementId, TextStyle>,
    role_styles: RoleStyleTable,
    locked: HashSet<ElementId>,
    hidden: HashSet<ElementId>,
    texts: HashMap<ElementId, String>,
}

impl ElementRegistry {
    /// Create an empty registry with the built-in role defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom role table.
    pub fn with_role_styles(role_styles: RoleStyleTable) -> Self {
        Self {
            role_styles,
            ..Self::default()
        }
    }

    // --- element table ---

    /// Register (or refresh) a rendered element. Retired ids are refused.
    /// Returns true if the element is registered afterwards.
    pub fn register(&mut self, info: ElementInfo) -> bool {
        if self.retired.contains(&info.id) {
            log::debug!("refusing to register retired id {}", info.id);
            return false;
        }
        if !self.elements.contains_key(&info.id) {
            self.order.push(info.id.clone());
        }
        self.elements.insert(info.id.clone(), info);
        true
    }

    /// Replace the element table with the result of a render pass.
    ///
    /// Layers of elements that disappear are kept: navigating back to a
    /// view brings them back unchanged.
    pub fn sync_elements(&mut self, infos: impl IntoIterator<Item = ElementInfo>) {
        self.elements.clear();
        self.order.clear();
        for info in infos {
            self.register(info);
        }
    }

    /// Delete an element and all of its layers. The id is retired.
    pub fn remove(&mut self, id: &ElementId) -> Option<ElementInfo> {
        let info = self.elements.remove(id)?;
        self.order.retain(|other| other != id);
        self.transforms.remove(id);
        self.style_overrides.remove(id);
        self.locked.remove(id);
        self.hidden.remove(id);
        self.texts.remove(id);
        self.retired.insert(id.clone());
        Some(info)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn is_retired(&self, id: &ElementId) -> bool {
        self.retired.contains(id)
    }

    pub fn info(&self, id: &ElementId) -> Option<&ElementInfo> {
        self.elements.get(id)
    }

    /// Registered elements in paint order (back to front).
    pub fn elements(&self) -> impl Iterator<Item = &ElementInfo> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Registered ids in paint order.
    pub fn ids(&self) -> &[ElementId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Bulk reset on document load: drops every per-element layer, forgets
    /// retired ids and restores the role defaults.
    pub fn reset(&mut self) {
        log::info!("resetting registry ({} elements)", self.elements.len());
        *self = Self::default();
    }

    fn known(&self, id: &ElementId, op: &str) -> bool {
        let known = self.elements.contains_key(id);
        if !known {
            log::debug!("{op}: ignoring unknown element {id}");
        }
        known
    }

    // --- transform layer ---

    pub fn transform(&self, id: &ElementId) -> Option<&Transform> {
        self.transforms.get(id)
    }

    /// Merge a partial transform into the element's record, creating the
    /// record at the natural-flow origin if absent.
    pub fn update_transform(&mut self, id: &ElementId, patch: &TransformPatch) {
        if !self.known(id, "update_transform") {
            return;
        }
        self.transforms.entry(id.clone()).or_default().apply(patch);
    }

    pub fn replace_transform(&mut self, id: &ElementId, transform: Transform) {
        if !self.known(id, "replace_transform") {
            return;
        }
        self.transforms.insert(id.clone(), transform);
    }

    /// Drop the transform so the element returns to its natural position.
    pub fn clear_transform(&mut self, id: &ElementId) {
        self.transforms.remove(id);
    }

    /// Registered ids sorted by descending z-index. Ties keep paint order.
    pub fn layer_list(&self) -> Vec<ElementId> {
        let mut ids = self.order.clone();
        ids.sort_by_key(|id| Reverse(self.z_index(id)));
        ids
    }

    /// Z-index of an element; unset reads as 0.
    pub fn z_index(&self, id: &ElementId) -> u32 {
        self.transforms.get(id).map_or(0, Transform::z)
    }

    /// Highest z-index in the document.
    pub fn max_z_index(&self) -> u32 {
        self.order.iter().map(|id| self.z_index(id)).max().unwrap_or(0)
    }

    // --- style layers ---

    pub fn style_override(&self, id: &ElementId) -> Option<&TextStyle> {
        self.style_overrides.get(id)
    }

    /// True if an override record exists, even one with no defined fields.
    pub fn has_style_override(&self, id: &ElementId) -> bool {
        self.style_overrides.contains_key(id)
    }

    /// Merge a partial into the element's override, creating it if absent.
    pub fn update_style_override(&mut self, id: &ElementId, partial: &TextStyle) {
        if !self.known(id, "update_style_override") {
            return;
        }
        let partial = partial.clone().sanitized();
        self.style_overrides.entry(id.clone()).or_default().merge(&partial);
    }

    pub fn replace_style_override(&mut self, id: &ElementId, style: TextStyle) {
        if !self.known(id, "replace_style_override") {
            return;
        }
        self.style_overrides.insert(id.clone(), style.sanitized());
    }

    /// Undefine one field of the override. The record itself stays.
    pub fn clear_style_field(&mut self, id: &ElementId, field: StyleField) {
        if let Some(style) = self.style_overrides.get_mut(id) {
            style.clear_field(field);
        }
    }

    /// Delete the override record entirely.
    pub fn clear_style_override(&mut self, id: &ElementId) {
        self.style_overrides.remove(id);
    }

    pub fn role_styles(&self) -> &RoleStyleTable {
        &self.role_styles
    }

    pub fn role_style(&self, role: TextRole) -> &TextStyle {
        self.role_styles.get(role)
    }

    pub fn update_role_style(&mut self, role: TextRole, partial: &TextStyle) {
        self.role_styles.update(role, &partial.clone().sanitized());
    }

    pub fn replace_role_style(&mut self, role: TextRole, style: TextStyle) {
        self.role_styles.replace(role, style.sanitized());
    }

    // --- flags ---

    pub fn is_locked(&self, id: &ElementId) -> bool {
        self.locked.contains(id)
    }

    pub fn set_locked(&mut self, id: &ElementId, locked: bool) {
        if !self.known(id, "set_locked") {
            return;
        }
        if locked {
            self.locked.insert(id.clone());
        } else {
            self.locked.remove(id);
        }
    }

    /// Flip the lock flag. Returns the new state, or `None` for unknown ids.
    pub fn toggle_locked(&mut self, id: &ElementId) -> Option<bool> {
        if !self.contains(id) {
            return None;
        }
        let locked = !self.is_locked(id);
        self.set_locked(id, locked);
        Some(locked)
    }

    pub fn is_hidden(&self, id: &ElementId) -> bool {
        self.hidden.contains(id)
    }

    pub fn set_hidden(&mut self, id: &ElementId, hidden: bool) {
        if !self.known(id, "set_hidden") {
            return;
        }
        if hidden {
            self.hidden.insert(id.clone());
        } else {
            self.hidden.remove(id);
        }
    }

    /// Flip the hidden flag. Returns the new state, or `None` for unknown ids.
    pub fn toggle_hidden(&mut self, id: &ElementId) -> Option<bool> {
        if !self.contains(id) {
            return None;
        }
        let hidden = !self.is_hidden(id);
        self.set_hidden(id, hidden);
        Some(hidden)
    }

    /// Registered, visible and unlocked: may be moved or resized.
    pub fn is_transformable(&self, id: &ElementId) -> bool {
        self.contains(id) && !self.is_locked(id) && !self.is_hidden(id)
    }

    // --- text layer ---

    /// Committed text override, if any.
    pub fn text(&self, id: &ElementId) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    /// Text to display: the committed override, else the original content.
    pub fn display_text(&self, id: &ElementId) -> Option<&str> {
        self.text(id)
            .or_else(|| self.elements.get(id).map(|info| info.content.as_str()))
    }

    pub fn set_text(&mut self, id: &ElementId, text: impl Into<String>) {
        if !self.known(id, "set_text") {
            return;
        }
        self.texts.insert(id.clone(), text.into());
    }

    /// Drop the committed override so the original content shows again.
    pub fn clear_text(&mut self, id: &ElementId) {
        self.texts.remove(id);
    }
}
