//! Sparse text styles and the role-level style table.

use crate::element::TextRole;
use crate::error::EditorError;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Text color (RGBA8), serialized as a `#rrggbb` / `#rrggbbaa` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StyleColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StyleColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self, EditorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || EditorError::InvalidColor(hex.to_string());
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        if !digits.is_ascii() {
            return Err(invalid());
        }
        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, c) in channels.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                    *channel = v * 17;
                }
                Ok(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Self::rgb(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
            )),
            8 => Ok(Self::new(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for StyleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for StyleColor {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<StyleColor> for String {
    fn from(color: StyleColor) -> Self {
        color.to_string()
    }
}

impl From<Color> for StyleColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<StyleColor> for Color {
    fn from(color: StyleColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    None,
    Underline,
    LineThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Names a single [`TextStyle`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleField {
    FontSize,
    FontWeight,
    FontStyle,
    TextDecoration,
    Color,
    TextAlign,
    CurrencySymbol,
    LeaderDots,
}

/// Sparse text style. A `None` field inherits from the next layer down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    /// Dotted leader between item name and price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_dots: Option<bool>,
}

impl TextStyle {
    /// Style with no defined fields.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    pub fn with_decoration(mut self, decoration: TextDecoration) -> Self {
        self.text_decoration = Some(decoration);
        self
    }

    pub fn with_color(mut self, color: StyleColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = Some(symbol.into());
        self
    }

    pub fn with_leader_dots(mut self, on: bool) -> Self {
        self.leader_dots = Some(on);
        self
    }

    /// True when no field is defined.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Copy every field `other` defines onto `self`.
    pub fn merge(&mut self, other: &TextStyle) {
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.font_weight.is_some() {
            self.font_weight = other.font_weight;
        }
        if other.font_style.is_some() {
            self.font_style = other.font_style;
        }
        if other.text_decoration.is_some() {
            self.text_decoration = other.text_decoration;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.text_align.is_some() {
            self.text_align = other.text_align;
        }
        if other.currency_symbol.is_some() {
            self.currency_symbol.clone_from(&other.currency_symbol);
        }
        if other.leader_dots.is_some() {
            self.leader_dots = other.leader_dots;
        }
    }

    /// `self` on top of `lower`: fields `self` leaves undefined come from `lower`.
    pub fn layered_over(&self, lower: &TextStyle) -> TextStyle {
        let mut out = lower.clone();
        out.merge(self);
        out
    }

    /// Undefine one field.
    pub fn clear_field(&mut self, field: StyleField) {
        match field {
            StyleField::FontSize => self.font_size = None,
            StyleField::FontWeight => self.font_weight = None,
            StyleField::FontStyle => self.font_style = None,
            StyleField::TextDecoration => self.text_decoration = None,
            StyleField::Color => self.color = None,
            StyleField::TextAlign => self.text_align = None,
            StyleField::CurrencySymbol => self.currency_symbol = None,
            StyleField::LeaderDots => self.leader_dots = None,
        }
    }

    /// Drop non-finite or non-positive font sizes.
    pub(crate) fn sanitized(mut self) -> Self {
        if let Some(size) = self.font_size {
            if !size.is_finite() || size <= 0.0 {
                log::debug!("dropping invalid font size {size}");
                self.font_size = None;
            }
        }
        self
    }
}

static EMPTY_STYLE: TextStyle = TextStyle {
    font_size: None,
    font_weight: None,
    font_style: None,
    text_decoration: None,
    color: None,
    text_align: None,
    currency_symbol: None,
    leader_dots: None,
};

/// Role → default style. Always holds an entry for every role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleStyleTable {
    styles: BTreeMap<TextRole, TextStyle>,
}

impl Default for RoleStyleTable {
    fn default() -> Self {
        let mut styles = BTreeMap::new();
        for &role in TextRole::all() {
            styles.insert(role, default_role_style(role));
        }
        Self { styles }
    }
}

impl RoleStyleTable {
    /// Table with every role mapped to an empty style.
    pub fn empty() -> Self {
        Self {
            styles: TextRole::all()
                .iter()
                .map(|&role| (role, TextStyle::default()))
                .collect(),
        }
    }

    /// Style for a role.
    pub fn get(&self, role: TextRole) -> &TextStyle {
        self.styles.get(&role).unwrap_or(&EMPTY_STYLE)
    }

    /// Merge a partial into a role's style.
    pub fn update(&mut self, role: TextRole, partial: &TextStyle) {
        self.styles.entry(role).or_default().merge(partial);
    }

    /// Replace a role's style.
    pub fn replace(&mut self, role: TextRole, style: TextStyle) {
        self.styles.insert(role, style);
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextRole, &TextStyle)> {
        self.styles.iter().map(|(role, style)| (*role, style))
    }
}

/// Built-in role defaults applied at document init.
pub fn default_role_style(role: TextRole) -> TextStyle {
    match role {
        TextRole::Header => TextStyle::new()
            .with_font_size(36.0)
            .with_font_weight(FontWeight::Bold)
            .with_align(TextAlign::Center)
            .with_color(StyleColor::rgb(0x1f, 0x29, 0x37)),
        TextRole::Subheader => TextStyle::new()
            .with_font_size(22.0)
            .with_font_weight(FontWeight::Bold)
            .with_color(StyleColor::rgb(0x37, 0x41, 0x51)),
        TextRole::Body => TextStyle::new()
            .with_font_size(16.0)
            .with_font_weight(FontWeight::Normal)
            .with_color(StyleColor::rgb(0x1f, 0x29, 0x37)),
        TextRole::Price => TextStyle::new()
            .with_font_size(16.0)
            .with_font_weight(FontWeight::Bold)
            .with_align(TextAlign::Right)
            .with_currency("$")
            .with_leader_dots(false),
        TextRole::Description => TextStyle::new()
            .with_font_size(13.0)
            .with_font_style(FontStyle::Italic)
            .with_color(StyleColor::rgb(0x6b, 0x72, 0x80)),
    }
}
