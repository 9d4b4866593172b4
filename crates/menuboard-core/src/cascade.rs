//! Style resolution.
//!
//! Effective style is a field-wise cascade, highest precedence first:
//! element override, role default (only when a role is given), then the
//! document defaults supplied by the rendering layer. Resolution is pure.

use crate::element::{ElementId, TextRole};
use crate::registry::ElementRegistry;
use crate::style::TextStyle;

/// Override layered over the role default. Fields neither layer defines stay
/// `None`, for the caller's own fallback to fill.
pub fn compute_style(registry: &ElementRegistry, id: &ElementId, role: Option<TextRole>) -> TextStyle {
    let mut style = role
        .map(|role| registry.role_style(role).clone())
        .unwrap_or_default();
    if let Some(over) = registry.style_override(id) {
        style.merge(over);
    }
    style
}

/// [`compute_style`] with the document defaults as the bottom layer.
pub fn resolve_style(
    registry: &ElementRegistry,
    id: &ElementId,
    role: Option<TextRole>,
    defaults: &TextStyle,
) -> TextStyle {
    compute_style(registry, id, role).layered_over(defaults)
}

/// Existence check for the element's override record.
pub fn has_style_override(registry: &ElementRegistry, id: &ElementId) -> bool {
    registry.has_style_override(id)
}
