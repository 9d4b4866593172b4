//! Element identity and the descriptors the rendering layer reports.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for one designable unit on the canvas.
///
/// Ids are opaque. Structure (section, item, ...) lives in [`ElementAddress`],
/// never in the id text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wrap an existing id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Coarse type tag of a designable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Text,
    Image,
    Shape,
    Group,
}

/// Semantic text category used for style defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Header,
    Subheader,
    Body,
    Price,
    Description,
}

impl TextRole {
    /// All roles, in display order.
    pub fn all() -> &'static [TextRole] {
        &[
            TextRole::Header,
            TextRole::Subheader,
            TextRole::Body,
            TextRole::Price,
            TextRole::Description,
        ]
    }

    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            TextRole::Header => "Header",
            TextRole::Subheader => "Subheader",
            TextRole::Body => "Body",
            TextRole::Price => "Price",
            TextRole::Description => "Description",
        }
    }
}

/// What part of the menu an element renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Menu title.
    Title,
    /// A whole section block.
    Section,
    /// Heading of a section.
    SectionTitle,
    /// A whole menu item row.
    Item,
    /// Name of a menu item.
    ItemName,
    /// Price of a menu item.
    ItemPrice,
    /// Description line of a menu item.
    ItemDescription,
    /// Template ornament (dividers, frames, images).
    Decoration,
    /// Element added by the user outside the menu structure.
    Free,
}

/// Structured position of an element inside the menu.
///
/// `path` indexes from the outside in, e.g. `[section, item]` for an item
/// price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementAddress {
    pub kind: AddressKind,
    #[serde(default)]
    pub path: Vec<u32>,
}

impl ElementAddress {
    /// Create an address.
    pub fn new(kind: AddressKind, path: impl Into<Vec<u32>>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Section index, if the address lives inside a section.
    pub fn section(&self) -> Option<u32> {
        match self.kind {
            AddressKind::Section
            | AddressKind::SectionTitle
            | AddressKind::Item
            | AddressKind::ItemName
            | AddressKind::ItemPrice
            | AddressKind::ItemDescription => self.path.first().copied(),
            _ => None,
        }
    }

    /// Item index within its section, if the address is an item part.
    pub fn item(&self) -> Option<u32> {
        match self.kind {
            AddressKind::Item
            | AddressKind::ItemName
            | AddressKind::ItemPrice
            | AddressKind::ItemDescription => self.path.get(1).copied(),
            _ => None,
        }
    }
}

/// Descriptor of one rendered unit, as reported by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub id: ElementId,
    #[serde(default)]
    pub kind: ElementKind,
    /// Style role; only meaningful for text units.
    #[serde(default)]
    pub role: Option<TextRole>,
    #[serde(default)]
    pub address: Option<ElementAddress>,
    /// Screen-space layout box from the last render pass, before rotation.
    pub bounds: Rect,
    /// Original text content, before any inline edit.
    #[serde(default)]
    pub content: String,
}

impl ElementInfo {
    /// Create a text element descriptor.
    pub fn text(id: impl Into<ElementId>, role: TextRole, bounds: Rect, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Text,
            role: Some(role),
            address: None,
            bounds,
            content: content.into(),
        }
    }

    /// Create a non-text element descriptor.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            role: None,
            address: None,
            bounds,
            content: String::new(),
        }
    }

    /// Attach a structured address.
    pub fn with_address(mut self, address: ElementAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Whether this unit can enter inline text editing.
    pub fn is_editable_text(&self) -> bool {
        self.kind == ElementKind::Text && self.role.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(ElementId::generate(), ElementId::generate());
    }

    #[test]
    fn test_address_accessors() {
        let price = ElementAddress::new(AddressKind::ItemPrice, [2, 5]);
        assert_eq!(price.section(), Some(2));
        assert_eq!(price.item(), Some(5));

        let heading = ElementAddress::new(AddressKind::SectionTitle, [1]);
        assert_eq!(heading.section(), Some(1));
        assert_eq!(heading.item(), None);

        let title = ElementAddress::new(AddressKind::Title, Vec::new());
        assert_eq!(title.section(), None);
    }

    #[test]
    fn test_editable_text_requires_role() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let text = ElementInfo::text("a", TextRole::Body, bounds, "Soup");
        assert!(text.is_editable_text());

        let mut roleless = text.clone();
        roleless.role = None;
        assert!(!roleless.is_editable_text());

        let image = ElementInfo::new("b", ElementKind::Image, bounds);
        assert!(!image.is_editable_text());
    }

    #[test]
    fn test_element_info_json() {
        let json = r#"{
            "id": "item-name-1",
            "kind": "text",
            "role": "price",
            "address": { "kind": "item_price", "path": [0, 1] },
            "bounds": { "x0": 0.0, "y0": 0.0, "x1": 40.0, "y1": 12.0 },
            "content": "$9"
        }"#;
        let info: ElementInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.id.as_str(), "item-name-1");
        assert_eq!(info.role, Some(TextRole::Price));
        assert_eq!(info.address.unwrap().item(), Some(1));
    }
}
