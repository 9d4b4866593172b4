//! Menuboard Core Library
//!
//! Platform-agnostic document model and direct-manipulation engine for the
//! Menuboard menu layout editor: element registry, style cascade, selection,
//! transform gestures, alignment guides and inline text editing.

pub mod cascade;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod guides;
pub mod handles;
pub mod input;
pub mod manipulation;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod snap;
pub mod style;
pub mod text_edit;
pub mod transform;

pub use cascade::{compute_style, has_style_override, resolve_style};
pub use config::EditorConfig;
pub use editor::{Editor, ElementView};
pub use element::{AddressKind, ElementAddress, ElementId, ElementInfo, ElementKind, TextRole};
pub use error::{EditorError, EditorResult};
pub use guides::{AlignmentGuide, DistanceBadge, GuideAnchor, GuideAxis, alignment_guides, distance_badges};
pub use handles::{Corner, Edge, Handle, HandleKind, ResizeHandle};
pub use input::{Key, KeyCommand, KeyEvent, Modifiers, PointerEvent};
pub use manipulation::{DragFeedback, Gesture, TransformEngine, ZOrder};
pub use registry::ElementRegistry;
pub use scene::{Scene, StaticScene};
pub use selection::{SelectionController, SelectionMode};
pub use snap::{SnapResult, snap_to_page};
pub use style::{RoleStyleTable, StyleColor, StyleField, TextStyle};
pub use text_edit::{EditOutcome, EditState, InlineEditor};
pub use transform::{Transform, TransformPatch};
