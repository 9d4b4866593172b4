//! Inline text editing.
//!
//! At most one element is in edit mode. The draft lives here until it is
//! committed into the registry's text layer; cancelling drops it.

use crate::element::ElementId;
use crate::registry::ElementRegistry;

/// Inline editor state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    /// Display mode.
    #[default]
    Idle,
    /// One element shows an editable field.
    Editing { id: ElementId, draft: String },
}

impl EditState {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

/// What happened to an edit when it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Committed { id: ElementId, text: String },
    Cancelled { id: ElementId },
}

#[derive(Debug, Clone, Default)]
pub struct InlineEditor {
    state: EditState,
}

impl InlineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Id of the element in edit mode.
    pub fn editing(&self) -> Option<&ElementId> {
        match &self.state {
            EditState::Editing { id, .. } => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self, id: &ElementId) -> bool {
        self.editing() == Some(id)
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    /// Whether `id` may enter edit mode: a registered text element with a
    /// role, unlocked and visible.
    pub fn can_edit(id: &ElementId, registry: &ElementRegistry) -> bool {
        registry.info(id).is_some_and(|info| info.is_editable_text())
            && !registry.is_locked(id)
            && !registry.is_hidden(id)
    }

    /// Enter edit mode on `id`. An edit already running on another element
    /// is committed first. Returns the outcome of that prior edit, if any.
    ///
    /// Ineligible ids leave the state untouched.
    pub fn start(&mut self, id: &ElementId, registry: &mut ElementRegistry) -> Option<EditOutcome> {
        if self.is_editing(id) {
            return None;
        }
        if !Self::can_edit(id, registry) {
            log::debug!("inline edit on {id} refused");
            return None;
        }
        let previous = self.commit(None, registry);
        let draft = registry.display_text(id).unwrap_or_default().to_string();
        log::debug!("inline edit started on {id}");
        self.state = EditState::Editing {
            id: id.clone(),
            draft,
        };
        previous
    }

    /// Replace the draft (one keystroke or paste). Ignored when idle.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let EditState::Editing { draft, .. } = &mut self.state {
            *draft = text.into();
        }
    }

    /// Leave edit mode, writing `text` (or the draft when `None`) into the
    /// text layer. Blur commits the same way.
    pub fn commit(&mut self, text: Option<String>, registry: &mut ElementRegistry) -> Option<EditOutcome> {
        let EditState::Editing { id, draft } = std::mem::take(&mut self.state) else {
            return None;
        };
        let text = text.unwrap_or(draft);
        registry.set_text(&id, text.clone());
        log::debug!("inline edit committed on {id}");
        Some(EditOutcome::Committed { id, text })
    }

    /// Leave edit mode without touching the text layer.
    pub fn cancel(&mut self) -> Option<EditOutcome> {
        let EditState::Editing { id, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        log::debug!("inline edit cancelled on {id}");
        Some(EditOutcome::Cancelled { id })
    }

    /// Drop edit mode without committing (document navigation).
    pub fn reset(&mut self) {
        self.state = EditState::Idle;
    }
}
