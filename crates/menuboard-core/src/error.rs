//! Errors for the fallible edges of the core (config, session decoding).
//!
//! Editing operations themselves never fail: stale ids, degenerate geometry
//! and state conflicts degrade to no-ops.

use thiserror::Error;

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for fallible editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
