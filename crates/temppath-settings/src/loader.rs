//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TempSettings::default()`]
//! 2. If `~/.temppath/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//! 4. Validate
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::TempSettings;

/// Env var overriding `truncation.limitBasenameLength`.
pub const ENV_LIMIT_BASENAME_LENGTH: &str = "TEMPPATH_LIMIT_BASENAME_LENGTH";
/// Env var overriding `registry.maxAllocateAttempts`.
pub const ENV_MAX_ALLOCATE_ATTEMPTS: &str = "TEMPPATH_MAX_ALLOCATE_ATTEMPTS";
/// Env var overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "TEMPPATH_LOG_LEVEL";

/// Resolve the path to the settings file (`~/.temppath/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".temppath").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TempSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON or the merged settings fail validation, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<TempSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn load_file_layer(path: &Path) -> Result<TempSettings> {
    let defaults = serde_json::to_value(TempSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Invalid values are ignored with a warning (falling back to file/default).
pub fn apply_env_overrides(settings: &mut TempSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup`.
///
/// Split out from [`apply_env_overrides`] so overrides can be tested without
/// mutating the process environment.
pub fn apply_overrides_from(settings: &mut TempSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = read_usize(&lookup, ENV_LIMIT_BASENAME_LENGTH, 1, 4096) {
        settings.truncation.limit_basename_length = v;
    }
    if let Some(v) = read_u32(&lookup, ENV_MAX_ALLOCATE_ATTEMPTS, 1, 1_000_000) {
        settings.registry.max_allocate_attempts = v;
    }
    if let Some(v) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
        settings.logging.level = v;
    }
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u32` within a range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Readers ─────────────────────────────────────────────────────────────────

fn read_usize(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    min: usize,
    max: usize,
) -> Option<usize> {
    let val = lookup(name)?;
    let result = parse_usize_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid usize env var, ignoring");
    }
    result
}

fn read_u32(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    min: u32,
    max: u32,
) -> Option<u32> {
    let val = lookup(name)?;
    let result = parse_u32_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u32 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SettingsError;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({
            "truncation": {"limitBasenameLength": 128},
            "logging": {"level": "warn"}
        });
        let source = serde_json::json!({"truncation": {"limitBasenameLength": 255}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["truncation"]["limitBasenameLength"], 255);
        assert_eq!(merged["logging"]["level"], "warn");
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let source = serde_json::json!({"a": 42});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 42);
    }

    // ── load_settings_from_path ─────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let mut settings = load_file_layer(Path::new("/nonexistent/settings.json")).unwrap();
        apply_overrides_from(&mut settings, |_| None);
        assert_eq!(settings, TempSettings::default());
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"registry": {"maxAllocateAttempts": 4}}"#).unwrap();

        let settings = load_file_layer(&path).unwrap();
        assert_eq!(settings.registry.max_allocate_attempts, 4);
        assert_eq!(settings.truncation.limit_basename_length, 128);
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json").unwrap();

        assert_matches!(load_settings_from_path(&path), Err(SettingsError::Json(_)));
    }

    #[test]
    fn load_rejects_zero_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"truncation": {"limitBasenameLength": 0}}"#).unwrap();

        assert_matches!(
            load_settings_from_path(&path),
            Err(SettingsError::InvalidValue(_))
        );
    }

    // ── overrides ───────────────────────────────────────────────────

    #[test]
    fn overrides_applied() {
        let mut settings = TempSettings::default();
        apply_overrides_from(
            &mut settings,
            lookup_from(&[
                (ENV_LIMIT_BASENAME_LENGTH, "255"),
                (ENV_MAX_ALLOCATE_ATTEMPTS, "8"),
                (ENV_LOG_LEVEL, "debug"),
            ]),
        );
        assert_eq!(settings.truncation.limit_basename_length, 255);
        assert_eq!(settings.registry.max_allocate_attempts, 8);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn invalid_overrides_ignored() {
        let mut settings = TempSettings::default();
        apply_overrides_from(
            &mut settings,
            lookup_from(&[
                (ENV_LIMIT_BASENAME_LENGTH, "0"),
                (ENV_MAX_ALLOCATE_ATTEMPTS, "many"),
                (ENV_LOG_LEVEL, ""),
            ]),
        );
        assert_eq!(settings, TempSettings::default());
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_usize_valid_and_out_of_range() {
        assert_eq!(parse_usize_range("255", 1, 4096), Some(255));
        assert_eq!(parse_usize_range("0", 1, 4096), None);
        assert_eq!(parse_usize_range("5000", 1, 4096), None);
        assert_eq!(parse_usize_range("abc", 1, 4096), None);
    }

    #[test]
    fn parse_u32_valid_and_invalid() {
        assert_eq!(parse_u32_range("16", 1, 1_000_000), Some(16));
        assert_eq!(parse_u32_range("-1", 1, 1_000_000), None);
        assert_eq!(parse_u32_range("", 1, 1_000_000), None);
    }
}
