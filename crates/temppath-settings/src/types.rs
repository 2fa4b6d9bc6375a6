//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a partial
//! JSON file only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use temppath_core::constants::{DEFAULT_LIMIT_BASENAME_LENGTH, DEFAULT_MAX_ALLOCATE_ATTEMPTS};

use crate::errors::{Result, SettingsError};

/// Root settings type.
///
/// ```json
/// {
///   "truncation": { "limitBasenameLength": 255 },
///   "registry": { "maxAllocateAttempts": 16 },
///   "logging": { "level": "debug" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TempSettings {
    /// Basename truncation.
    pub truncation: TruncationSettings,
    /// Ownership registry.
    pub registry: RegistrySettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl TempSettings {
    /// Reject values the registry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.truncation.limit_basename_length == 0 {
            return Err(SettingsError::InvalidValue(
                "truncation.limitBasenameLength must be at least 1".into(),
            ));
        }
        if self.registry.max_allocate_attempts == 0 {
            return Err(SettingsError::InvalidValue(
                "registry.maxAllocateAttempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Basename truncation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TruncationSettings {
    /// Basename length ceiling in chars (default: 128).
    pub limit_basename_length: usize,
}

impl Default for TruncationSettings {
    fn default() -> Self {
        Self {
            limit_basename_length: DEFAULT_LIMIT_BASENAME_LENGTH,
        }
    }
}

/// Ownership registry settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrySettings {
    /// Candidates tried before allocation gives up (default: 128).
    pub max_allocate_attempts: u32,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            max_allocate_attempts: DEFAULT_MAX_ALLOCATE_ATTEMPTS,
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level applied by [`init_logging`](crate::init_logging).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
