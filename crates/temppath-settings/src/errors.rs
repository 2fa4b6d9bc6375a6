//! Errors from loading `~/.temppath/settings.json` and validating the result.
//!
//! The registry only sees these through [`temppath_core::TempError::Settings`].

use thiserror::Error;

/// Why a [`TempSettings`](crate::TempSettings) could not be produced.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid JSON, or a field has the wrong type.
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A limit is out of range, e.g. `truncation.limitBasenameLength` of 0.
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

impl From<SettingsError> for temppath_core::TempError {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err.to_string())
    }
}

/// Result alias for loading and validation.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
