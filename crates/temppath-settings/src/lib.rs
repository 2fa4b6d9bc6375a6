//! # temppath-settings
//!
//! Configuration with layered sources for temppath.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`TempSettings::default()`]
//! 2. **User file**: `~/.temppath/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `TEMPPATH_*` overrides (highest priority)
//!
//! The merged result is validated before it is handed out. [`init_logging`]
//! applies `logging.level` to the process-wide `tracing` subscriber.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton.
///
/// Initialized on first access via [`get_settings`], or explicitly via
/// [`init_settings`].
static SETTINGS: OnceLock<TempSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.temppath/settings.json` with env
/// var overrides. If loading fails, compiled defaults are used.
pub fn get_settings() -> &'static TempSettings {
    SETTINGS.get_or_init(|| {
        load_settings().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load settings, using defaults");
            TempSettings::default()
        })
    })
}

/// Initialize the global settings with a specific value.
///
/// Must be called before anything reads [`get_settings`] (in particular
/// before the global registry is first used).
///
/// # Errors
///
/// Returns the provided settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: TempSettings) -> std::result::Result<(), TempSettings> {
    SETTINGS.set(settings)
}

/// Install the stderr subscriber at the configured `logging.level`.
///
/// `RUST_LOG` still wins when set. No-op if a global subscriber exists.
pub fn init_logging() {
    init_logging_with(get_settings());
}

/// Install the stderr subscriber at `settings.logging.level`.
pub fn init_logging_with(settings: &TempSettings) {
    temppath_core::logging::init_subscriber(&settings.logging.level);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = TempSettings::default();
        let _path = settings_path();
    }

    #[test]
    fn default_settings_are_valid() {
        let settings = TempSettings::default();
        assert_eq!(settings.truncation.limit_basename_length, 128);
        assert_eq!(settings.registry.max_allocate_attempts, 128);
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn global_settings_are_cached() {
        let a = get_settings();
        let b = get_settings();
        assert!(std::ptr::eq(a, b));
        assert!(init_settings(TempSettings::default()).is_err());
    }
}
