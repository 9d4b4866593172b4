//! Input events consumed by the editor.
//!
//! Events arrive already decoded by the host (mouse, touch or stylus all map
//! to the same pointer events). Double activation is reported by the host as
//! its own event; the core keeps no timers.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Meta, ctrl or shift: clicks toggle membership instead of replacing.
    pub fn is_additive(&self) -> bool {
        self.meta || self.ctrl || self.shift
    }

    /// Platform command key (ctrl or meta).
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        position: Point,
    },
    /// Double click / double tap.
    DoubleActivate {
        position: Point,
    },
    /// Pointer left the canvas.
    Leave,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    /// Any printable key, by its character.
    Char(char),
}

impl Key {
    /// Unit direction of an arrow key.
    pub fn arrow_direction(&self) -> Option<Vec2> {
        match self {
            Key::ArrowLeft => Some(Vec2::new(-1.0, 0.0)),
            Key::ArrowRight => Some(Vec2::new(1.0, 0.0)),
            Key::ArrowUp => Some(Vec2::new(0.0, -1.0)),
            Key::ArrowDown => Some(Vec2::new(0.0, 1.0)),
            _ => None,
        }
    }
}

/// Key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// Editor command bound to a key chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    /// Move selection by a document-space delta.
    Nudge(Vec2),
    SelectAll,
    BringForward,
    SendBackward,
    ToggleLock,
    /// Escape: cancel the inline edit, or clear the selection.
    Cancel,
    /// Enter: commit the inline edit, or start editing the primary selection.
    Confirm,
}

impl KeyCommand {
    /// Map a key chord to a command. Nudge distances come from the caller.
    pub fn from_key(event: &KeyEvent, step: f64, large_step: f64) -> Option<KeyCommand> {
        if let Some(direction) = event.key.arrow_direction() {
            let distance = if event.modifiers.shift { large_step } else { step };
            return Some(KeyCommand::Nudge(direction * distance));
        }
        match (&event.key, event.modifiers.command()) {
            (Key::Char('a' | 'A'), true) => Some(KeyCommand::SelectAll),
            (Key::Char('l' | 'L'), true) => Some(KeyCommand::ToggleLock),
            (Key::Char(']'), _) => Some(KeyCommand::BringForward),
            (Key::Char('['), _) => Some(KeyCommand::SendBackward),
            (Key::Escape, _) => Some(KeyCommand::Cancel),
            (Key::Enter, _) => Some(KeyCommand::Confirm),
            _ => None,
        }
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub command: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: bool, shift: bool, description: &'static str) -> Self {
        Self {
            key,
            command,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+A").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Every shortcut [`KeyCommand::from_key`] understands, for help screens.
pub fn shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new("Arrows", false, false, "Nudge selection by 1px"),
        Shortcut::new("Arrows", false, true, "Nudge selection by 10px"),
        Shortcut::new("A", true, false, "Select all elements"),
        Shortcut::new("L", true, false, "Lock or unlock selection"),
        Shortcut::new("]", false, false, "Bring forward"),
        Shortcut::new("[", false, false, "Send backward"),
        Shortcut::new("Enter", false, false, "Edit text / commit edit"),
        Shortcut::new("Escape", false, false, "Cancel edit / clear selection"),
    ]
}
