//! # temppath-registry
//!
//! Ownership registry for generated temp paths, with exit-time cleanup.
//!
//! - [`TempRegistry`]: allocate, release and purge temp paths
//! - [`Disposer`]: releases one entry without deleting its file
//! - [`ExitCoordinator`] / [`ExitGuard`]: purge everything left once, at exit
//! - [`Unlinker`]: filesystem delete primitives ([`FsUnlinker`] in production)
//!
//! Most applications use the process-wide registry from [`global`] and call
//! [`install`] once at startup. Code that wants an explicit handle can build
//! its own [`TempRegistry`] and [`ExitCoordinator`].

#![deny(unsafe_code)]

pub mod exit;
pub mod fs;
pub mod registry;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use exit::{ExitCoordinator, ExitGuard, flush_on_ctrl_c, install};
pub use fs::{FsUnlinker, Unlinker};
pub use registry::{Disposer, TempRegistry};

use std::sync::{Arc, OnceLock};

use temppath_settings::get_settings;

/// Process-wide registry, built on first use.
static GLOBAL: OnceLock<Arc<TempRegistry>> = OnceLock::new();

/// Get the process-wide registry.
///
/// Built from [`temppath_settings::get_settings`] with an [`FsUnlinker`] on
/// first access. Invalid settings fall back to compiled defaults.
pub fn global() -> &'static Arc<TempRegistry> {
    GLOBAL.get_or_init(|| {
        let registry = TempRegistry::from_settings(get_settings(), Arc::new(FsUnlinker))
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "invalid temp registry settings, using defaults");
                TempRegistry::default()
            });
        Arc::new(registry)
    })
}
