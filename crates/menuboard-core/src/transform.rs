//! Per-element transform records.
//!
//! A transform is an offset from the element's natural flow position plus
//! optional explicit size, rotation and stacking order. An element without a
//! transform renders at its natural position; it is never treated as `(0, 0)`.

use kurbo::{Affine, Vec2};
use serde::{Deserialize, Serialize};

/// Position/size/rotation/stacking record, in document-space pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Rotation in degrees, clockwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<u32>,
}

impl Transform {
    /// Transform at the given offset with nothing else set.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Z-index, with an unset value reading as 0.
    pub fn z(&self) -> u32 {
        self.z_index.unwrap_or(0)
    }

    /// Rotation in degrees, with an unset value reading as 0.
    pub fn rotation(&self) -> f64 {
        self.rotate.unwrap_or(0.0)
    }

    /// Merge every field `patch` defines.
    pub fn apply(&mut self, patch: &TransformPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if patch.width.is_some() {
            self.width = patch.width;
        }
        if patch.height.is_some() {
            self.height = patch.height;
        }
        if patch.rotate.is_some() {
            self.rotate = patch.rotate;
        }
        if patch.z_index.is_some() {
            self.z_index = patch.z_index;
        }
    }

    /// Affine the rendering layer applies around `pivot` (the element's
    /// natural-position center): translate by the offset, then rotate.
    pub fn to_affine(&self, pivot: kurbo::Point) -> Affine {
        let rotate = Affine::rotate_about(self.rotation().to_radians(), pivot);
        Affine::translate(self.offset()) * rotate
    }
}

/// Partial transform used for merge-updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<u32>,
}

impl TransformPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn rotate(degrees: f64) -> Self {
        Self {
            rotate: Some(degrees),
            ..Self::default()
        }
    }

    pub fn z_index(z: u32) -> Self {
        Self {
            z_index: Some(z),
            ..Self::default()
        }
    }

    /// Replace degenerate values: non-finite positions and angles are
    /// dropped, sizes are clamped to `min_size`.
    pub fn sanitized(mut self, min_size: f64) -> Self {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        self.x = finite(self.x);
        self.y = finite(self.y);
        self.rotate = finite(self.rotate);
        self.width = self.width.map(|w| clamp_size(w, min_size));
        self.height = self.height.map(|h| clamp_size(h, min_size));
        self
    }
}

/// Clamp a size to `min_size`; non-finite values become `min_size`.
pub fn clamp_size(value: f64, min_size: f64) -> f64 {
    if !value.is_finite() || value < min_size {
        min_size
    } else {
        value
    }
}
