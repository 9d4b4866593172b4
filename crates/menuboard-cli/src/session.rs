//! Recorded editing sessions.
//!
//! A session is a scene description plus the input events a user produced
//! against it. Replaying feeds the events through an [`Editor`] in order and
//! reports the resulting per-element views.

use kurbo::Rect;
use menuboard_core::{
    DragFeedback, Editor, EditorConfig, EditorResult, ElementId, ElementView, KeyEvent, PointerEvent, SelectionMode,
    StaticScene, TextRole, TextStyle, TransformPatch,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    /// Keystrokes in the inline editor, as the full draft text.
    Draft(String),
    /// Style panel edit on one element.
    Style { id: ElementId, style: TextStyle },
    /// Style panel edit on a whole role.
    RoleStyle { role: TextRole, style: TextStyle },
    /// Bounds panel edit.
    Transform { id: ElementId, patch: TransformPatch },
    Hide { id: ElementId },
    Show { id: ElementId },
    /// Switch view without reloading the document.
    Navigate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub scene: StaticScene,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
    /// Document defaults, the bottom layer of the style cascade.
    #[serde(default)]
    pub defaults: TextStyle,
}

impl Session {
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Replay every event through a fresh editor.
    pub fn replay(&self, config: EditorConfig) -> Report {
        let mut editor = Editor::new(config);
        editor.load_document(&self.scene);

        for (index, event) in self.events.iter().enumerate() {
            log::trace!("event {index}: {event:?}");
            match event {
                SessionEvent::Pointer(pointer) => editor.handle_pointer(pointer, &self.scene),
                SessionEvent::Key(key) => {
                    if !editor.handle_key(key, &self.scene) {
                        log::debug!("event {index}: key {:?} not handled", key.key);
                    }
                }
                SessionEvent::Draft(text) => editor.set_draft(text.clone()),
                SessionEvent::Style { id, style } => editor.registry_mut().update_style_override(id, style),
                SessionEvent::RoleStyle { role, style } => editor.registry_mut().update_role_style(*role, style),
                SessionEvent::Transform { id, patch } => editor.update_transform(id, patch),
                SessionEvent::Hide { id } => editor.set_hidden(id, true),
                SessionEvent::Show { id } => editor.set_hidden(id, false),
                SessionEvent::Navigate => editor.navigate(),
            }
        }

        log::info!("replayed {} events", self.events.len());
        Report {
            selection: editor.selection_state(),
            selection_bounds: editor.selection_bounds(&self.scene),
            editing: editor.editing().cloned(),
            feedback: editor.feedback().clone(),
            elements: editor.views(&self.defaults),
        }
    }
}

/// Editor state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub selection: SelectionMode,
    pub selection_bounds: Option<Rect>,
    pub editing: Option<ElementId>,
    /// Guides and badges, non-empty only if the session ends mid-drag.
    pub feedback: DragFeedback,
    pub elements: Vec<ElementView>,
}
