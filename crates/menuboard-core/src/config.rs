//! Editor tuning knobs.

use crate::error::{EditorError, EditorResult};
use crate::guides::{BADGE_THRESHOLD, GUIDE_THRESHOLD};
use crate::snap::{ANGLE_SNAP_INCREMENT, PAGE_SNAP_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds and steps used by the manipulation engine.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Page snap distance for drags, in document pixels.
    pub drag_snap_threshold: f64,
    /// Also snap the vertical position to the page's top, middle and bottom.
    pub snap_vertical: bool,
    /// Alignment guide distance, in screen pixels.
    pub guide_threshold: f64,
    /// Largest gap that still gets a distance badge, in screen pixels.
    pub badge_threshold: f64,
    pub nudge_step: f64,
    /// Nudge distance with shift held.
    pub nudge_step_large: f64,
    /// Smallest width/height a resize can produce.
    pub min_element_size: f64,
    /// Rotation snap increment with shift held, in degrees.
    pub rotation_snap_degrees: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_snap_threshold: PAGE_SNAP_THRESHOLD,
            snap_vertical: false,
            guide_threshold: GUIDE_THRESHOLD,
            badge_threshold: BADGE_THRESHOLD,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            min_element_size: 10.0,
            rotation_snap_degrees: ANGLE_SNAP_INCREMENT,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Reject thresholds and steps that are zero, negative or non-finite.
    pub fn validate(&self) -> EditorResult<()> {
        let positive = [
            ("drag_snap_threshold", self.drag_snap_threshold),
            ("guide_threshold", self.guide_threshold),
            ("badge_threshold", self.badge_threshold),
            ("nudge_step", self.nudge_step),
            ("nudge_step_large", self.nudge_step_large),
            ("min_element_size", self.min_element_size),
            ("rotation_snap_degrees", self.rotation_snap_degrees),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EditorError::InvalidConfig(format!("{name} must be > 0, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.drag_snap_threshold, 8.0);
        assert!(!config.snap_vertical);
        assert_eq!(config.badge_threshold, 30.0);
        assert_eq!(config.nudge_step_large, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{ "snap_vertical": true, "nudge_step": 2 }"#).unwrap();
        assert!(config.snap_vertical);
        assert_eq!(config.nudge_step, 2.0);
        assert_eq!(config.min_element_size, 10.0);
    }

    #[test]
    fn test_rejects_non_positive() {
        let err = EditorConfig::from_json(r#"{ "guide_threshold": 0 }"#).unwrap_err();
        assert!(matches!(err, EditorError::InvalidConfig(_)));
        assert!(EditorConfig::from_json(r#"{ "nudge_step": -1 }"#).is_err());
    }

    #[test]
    fn test_bad_json() {
        let err = EditorConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, EditorError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "badge_threshold": 40 }}"#).unwrap();
        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.badge_threshold, 40.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
    }
}
