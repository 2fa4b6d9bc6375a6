//! Error types for temppath.
//!
//! Only a few conditions are surfaced as errors. Truncation that cannot be
//! performed and failed deletes are best effort: they are logged and the
//! operation proceeds.

use thiserror::Error;

/// Errors surfaced by the temp path registry.
#[derive(Debug, Error)]
pub enum TempError {
    /// Every candidate produced for `target` collided with a registered path.
    #[error("no unique temp path for {target} after {attempts} attempts")]
    CollisionExhausted {
        /// The target path the temp path was requested for.
        target: String,
        /// Number of candidates tried.
        attempts: u32,
    },

    /// The process exit hook was already installed.
    #[error("exit hook already installed")]
    ExitHookInstalled,

    /// Registry configuration was rejected.
    #[error("invalid configuration: {0}")]
    Settings(String),
}

impl TempError {
    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::CollisionExhausted { .. } => "COLLISION_EXHAUSTED",
            Self::ExitHookInstalled => "EXIT_HOOK_INSTALLED",
            Self::Settings(_) => "INVALID_SETTINGS",
        }
    }
}

/// Result type for temp path operations.
pub type Result<T> = std::result::Result<T, TempError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
