//! The editor: one registry plus the state machines that mutate it.
//!
//! [`Editor`] routes decoded input events between selection, manipulation
//! and inline editing, and exposes per-element views for the rendering
//! layer. It holds no reference to the scene; each call that needs the
//! rendered page takes it as an argument.

use crate::cascade::resolve_style;
use crate::config::EditorConfig;
use crate::element::ElementId;
use crate::handles::{HANDLE_HIT_TOLERANCE, Handle, HandleKind, get_handles, hit_test_handles};
use crate::input::{KeyCommand, Key, KeyEvent, PointerEvent};
use crate::manipulation::{DragFeedback, TransformEngine, ZOrder};
use crate::registry::ElementRegistry;
use crate::scene::Scene;
use crate::selection::{SelectionController, SelectionMode};
use crate::style::TextStyle;
use crate::text_edit::{EditOutcome, InlineEditor};
use crate::transform::{Transform, TransformPatch};
use kurbo::{Point, Rect};
use serde::Serialize;

/// Everything the rendering layer needs to draw one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementView {
    pub id: ElementId,
    /// Resolved style (override > role > document defaults).
    pub style: TextStyle,
    /// `None` means natural flow position.
    pub transform: Option<Transform>,
    pub selected: bool,
    pub primary: bool,
    pub hovered: bool,
    pub locked: bool,
    pub hidden: bool,
    pub editing: bool,
    /// Committed text override, else the original content.
    pub text: String,
    /// Live draft while editing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    config: EditorConfig,
    registry: ElementRegistry,
    selection: SelectionController,
    engine: TransformEngine,
    inline: InlineEditor,
    feedback: DragFeedback,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            engine: TransformEngine::new(config),
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Direct registry access for style and flag edits from side panels.
    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selection_state(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    pub fn inline_editor(&self) -> &InlineEditor {
        &self.inline
    }

    pub fn editing(&self) -> Option<&ElementId> {
        self.inline.editing()
    }

    /// Guides and badges of the current drag frame. Empty outside drags.
    pub fn feedback(&self) -> &DragFeedback {
        &self.feedback
    }

    // --- document lifecycle ---

    /// Load a new document: every per-element layer is dropped, role
    /// defaults are restored and the rendered elements are registered.
    pub fn load_document(&mut self, scene: &dyn Scene) {
        self.registry.reset();
        self.navigate();
        self.registry.sync_elements(scene.elements().iter().cloned());
        log::info!("document loaded with {} elements", self.registry.len());
    }

    /// Switch view within the same document. Only ephemeral state is reset.
    pub fn navigate(&mut self) {
        self.selection.reset();
        self.engine.end();
        self.inline.reset();
        self.feedback = DragFeedback::default();
    }

    /// Pick up a new render pass: the element table is replaced, stale
    /// selection is dropped, and an edit on a vanished element is abandoned.
    pub fn refresh(&mut self, scene: &dyn Scene) {
        self.registry.sync_elements(scene.elements().iter().cloned());
        self.selection.prune(&self.registry);
        if let Some(id) = self.inline.editing() {
            if !self.registry.contains(id) {
                log::debug!("edited element {id} no longer rendered");
                self.inline.reset();
            }
        }
    }

    // --- pointer ---

    pub fn handle_pointer(&mut self, event: &PointerEvent, scene: &dyn Scene) {
        match *event {
            PointerEvent::Down { position, modifiers } => {
                self.pointer_down(position, modifiers.is_additive(), scene);
            }
            PointerEvent::Move { position, modifiers } => {
                self.selection.update_hover(position, scene, &self.registry);
                self.feedback = self
                    .engine
                    .update_pointer(position, modifiers.shift, &mut self.registry)
                    .unwrap_or_default();
            }
            PointerEvent::Up { .. } => {
                self.engine.end();
                self.feedback = DragFeedback::default();
            }
            PointerEvent::DoubleActivate { position } => {
                if let Some(id) = self.target_at(position, scene) {
                    self.start_edit(&id);
                    if self.inline.is_editing(&id) {
                        self.selection.select(&id, &self.registry);
                    }
                }
            }
            PointerEvent::Leave => {
                self.selection.set_hovered(None, &self.registry);
            }
        }
    }

    fn pointer_down(&mut self, point: Point, additive: bool, scene: &dyn Scene) {
        if let Some(editing) = self.inline.editing() {
            // Presses inside the field belong to the text input.
            if scene.bounds(editing).is_some_and(|b| b.contains(point)) {
                return;
            }
            self.inline.commit(None, &mut self.registry);
        }

        if let Some((id, kind)) = self.handle_at(point, scene) {
            let started = match kind {
                HandleKind::Resize(handle) => {
                    self.engine
                        .start_resize(&id, handle, point, &self.registry, scene, None)
                }
                HandleKind::Rotate => self.engine.start_rotate(&id, &self.registry, scene, None),
            };
            if started {
                return;
            }
        }

        match self.target_at(point, scene) {
            Some(id) => {
                self.selection.click(&id, additive, &self.registry);
                if self.selection.is_selected(&id) {
                    self.engine.start_drag(
                        point,
                        self.selection.selected(),
                        &self.registry,
                        scene,
                        self.inline.editing(),
                    );
                }
            }
            None => self.selection.clear(),
        }
    }

    /// Topmost registered, visible element under `point` that is not being
    /// edited.
    fn target_at(&self, point: Point, scene: &dyn Scene) -> Option<ElementId> {
        scene.hit_test(point).into_iter().find(|id| {
            self.registry.contains(id) && !self.registry.is_hidden(id) && !self.inline.is_editing(id)
        })
    }

    /// Handle of the primary selection under `point`.
    fn handle_at(&self, point: Point, scene: &dyn Scene) -> Option<(ElementId, HandleKind)> {
        let id = self.selection.primary()?;
        if !self.registry.is_transformable(id) || self.inline.is_editing(id) {
            return None;
        }
        let bounds = scene.bounds(id)?;
        let rotation = self.registry.transform(id).map_or(0.0, Transform::rotation);
        let kind = hit_test_handles(bounds, rotation, point, HANDLE_HIT_TOLERANCE)?;
        Some((id.clone(), kind))
    }

    /// Handles to draw around the primary selection. None for locked,
    /// hidden or edited elements.
    pub fn handles(&self, scene: &dyn Scene) -> Vec<Handle> {
        let Some(id) = self.selection.primary() else {
            return Vec::new();
        };
        if !self.registry.is_transformable(id) || self.inline.is_editing(id) {
            return Vec::new();
        }
        let rotation = self.registry.transform(id).map_or(0.0, Transform::rotation);
        scene
            .bounds(id)
            .map(|bounds| get_handles(bounds, rotation))
            .unwrap_or_default()
    }

    // --- keyboard ---

    /// Apply a key press. Returns whether the editor consumed it.
    pub fn handle_key(&mut self, event: &KeyEvent, scene: &dyn Scene) -> bool {
        if self.inline.editing().is_some() {
            return match event.key {
                Key::Escape => self.inline.cancel().is_some(),
                Key::Enter => self.inline.commit(None, &mut self.registry).is_some(),
                // Everything else is typing; the host feeds it through set_draft.
                _ => false,
            };
        }

        let Some(command) = KeyCommand::from_key(event, self.config.nudge_step, self.config.nudge_step_large) else {
            return false;
        };
        let selected = self.selection.selected();
        match command {
            KeyCommand::Nudge(delta) => self.engine.nudge(delta, selected, &mut self.registry, None) > 0,
            KeyCommand::SelectAll => {
                self.selection.select_all(scene, &self.registry);
                true
            }
            KeyCommand::BringForward => {
                self.engine.reorder(ZOrder::Forward, selected, &mut self.registry, None) > 0
            }
            KeyCommand::SendBackward => {
                self.engine.reorder(ZOrder::Backward, selected, &mut self.registry, None) > 0
            }
            KeyCommand::ToggleLock => self.toggle_lock_selection(),
            KeyCommand::Cancel => {
                let had_selection = !self.selection.is_empty();
                self.selection.clear();
                had_selection
            }
            KeyCommand::Confirm => match self.selection.primary().cloned() {
                Some(id) => {
                    self.start_edit(&id);
                    self.inline.is_editing(&id)
                }
                None => false,
            },
        }
    }

    /// Lock the whole selection if any member is unlocked, else unlock it.
    pub fn toggle_lock_selection(&mut self) -> bool {
        let selected = self.selection.selected();
        if selected.is_empty() {
            return false;
        }
        let lock = selected.iter().any(|id| !self.registry.is_locked(id));
        for id in selected {
            self.registry.set_locked(id, lock);
        }
        log::debug!("{} {} element(s)", if lock { "locked" } else { "unlocked" }, selected.len());
        true
    }

    /// Hide or show an element. Hidden elements leave the selection and
    /// lose hover.
    pub fn set_hidden(&mut self, id: &ElementId, hidden: bool) {
        self.registry.set_hidden(id, hidden);
        if hidden {
            self.selection.deselect(id);
            self.selection.prune(&self.registry);
            if self.inline.is_editing(id) {
                self.inline.cancel();
            }
        }
    }

    /// Numeric transform edit (bounds panel). Non-finite values are dropped
    /// and sizes clamped to the configured minimum.
    pub fn update_transform(&mut self, id: &ElementId, patch: &TransformPatch) {
        let patch = patch.sanitized(self.config.min_element_size);
        self.registry.update_transform(id, &patch);
    }

    // --- inline edit ---

    /// Enter edit mode on `id`, committing any other running edit.
    pub fn start_edit(&mut self, id: &ElementId) -> Option<EditOutcome> {
        self.engine.end();
        self.inline.start(id, &mut self.registry)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.inline.set_draft(text);
    }

    /// Commit the running edit (Enter or blur).
    pub fn commit_edit(&mut self) -> Option<EditOutcome> {
        self.inline.commit(None, &mut self.registry)
    }

    pub fn cancel_edit(&mut self) -> Option<EditOutcome> {
        self.inline.cancel()
    }

    // --- views ---

    /// View of one registered element, or `None` if it is unknown.
    pub fn element_view(&self, id: &ElementId, defaults: &TextStyle) -> Option<ElementView> {
        let info = self.registry.info(id)?;
        let editing = self.inline.is_editing(id);
        Some(ElementView {
            id: id.clone(),
            style: resolve_style(&self.registry, id, info.role, defaults),
            transform: self.registry.transform(id).copied(),
            selected: self.selection.is_selected(id),
            primary: self.selection.primary() == Some(id),
            hovered: self.selection.hovered() == Some(id),
            locked: self.registry.is_locked(id),
            hidden: self.registry.is_hidden(id),
            editing,
            text: self.registry.display_text(id).unwrap_or_default().to_string(),
            draft: if editing { self.inline.draft().map(str::to_string) } else { None },
        })
    }

    /// Views of every registered element in paint order.
    pub fn views(&self, defaults: &TextStyle) -> Vec<ElementView> {
        self.registry
            .ids()
            .iter()
            .filter_map(|id| self.element_view(id, defaults))
            .collect()
    }

    /// Union of the rendered bounds of the selection, in screen space.
    pub fn selection_bounds(&self, scene: &dyn Scene) -> Option<Rect> {
        self.selection
            .selected()
            .iter()
            .filter_map(|id| scene.bounds(id))
            .reduce(|acc, bounds| acc.union(bounds))
    }
}
