//! Exit-time cleanup.
//!
//! Rust has no process-exit callback, so cleanup is tied to an [`ExitGuard`]
//! that the host application creates once at startup (usually via
//! [`install`]) and keeps alive in `main`. Dropping the guard, either on
//! return from `main` or while unwinding from a panic, purges every
//! registered purge-eligible temp path exactly once.
//!
//! ```no_run
//! fn main() -> Result<(), temppath_core::TempError> {
//!     let _temp_guard = temppath_registry::install()?;
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! Skipping [`install`] disables automatic cleanup. `std::process::exit`
//! skips destructors, so call [`ExitGuard::exit`] instead. Nothing runs on
//! `SIGKILL` or `abort`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use temppath_core::{Result, TempError};
use tracing::{info, warn};

use crate::registry::TempRegistry;

/// Set once [`install`] has handed out the global guard.
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Runs the final purge of a registry at most once.
#[derive(Debug)]
pub struct ExitCoordinator {
    registry: Arc<TempRegistry>,
    flushed: AtomicBool,
}

impl ExitCoordinator {
    /// Create a coordinator for `registry`.
    pub fn new(registry: Arc<TempRegistry>) -> Self {
        Self {
            registry,
            flushed: AtomicBool::new(false),
        }
    }

    /// The registry flushed by this coordinator.
    pub fn registry(&self) -> &Arc<TempRegistry> {
        &self.registry
    }

    /// Purge all eligible temp paths synchronously.
    ///
    /// Only the first call does any work. Returns whether this call flushed.
    pub fn flush(&self) -> bool {
        if self.flushed.swap(true, Ordering::SeqCst) {
            return false;
        }
        let purged = self.registry.purge_all_sync();
        info!(purged, "flushed temp paths on exit");
        true
    }

    /// Whether [`flush`](Self::flush) has run.
    pub fn has_flushed(&self) -> bool {
        self.flushed.load(Ordering::SeqCst)
    }

    /// Create a guard that flushes this coordinator on drop.
    pub fn guard(self: &Arc<Self>) -> ExitGuard {
        ExitGuard {
            coordinator: Arc::clone(self),
        }
    }
}

/// Flushes its [`ExitCoordinator`] when dropped.
#[must_use = "dropping the guard purges temp paths immediately"]
#[derive(Debug)]
pub struct ExitGuard {
    coordinator: Arc<ExitCoordinator>,
}

impl ExitGuard {
    /// The coordinator behind this guard.
    pub fn coordinator(&self) -> &Arc<ExitCoordinator> {
        &self.coordinator
    }

    /// Flush, then terminate the process with `code`.
    pub fn exit(self, code: i32) -> ! {
        let _ = self.coordinator.flush();
        std::process::exit(code)
    }
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            warn!("flushing temp paths while panicking");
        }
        let _ = self.coordinator.flush();
    }
}

/// Install the exit hook for the global registry.
///
/// Call once at startup and hold the returned guard for the lifetime of the
/// process.
///
/// # Errors
///
/// [`TempError::ExitHookInstalled`] if called more than once.
pub fn install() -> Result<ExitGuard> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Err(TempError::ExitHookInstalled);
    }
    let coordinator = Arc::new(ExitCoordinator::new(Arc::clone(crate::global())));
    Ok(coordinator.guard())
}

/// Wait for Ctrl-C, then flush `coordinator`.
///
/// The caller decides whether to exit afterwards. Returns whether this call
/// flushed.
pub async fn flush_on_ctrl_c(coordinator: Arc<ExitCoordinator>) -> std::io::Result<bool> {
    tokio::signal::ctrl_c().await?;
    info!("ctrl-c received, flushing temp paths");
    Ok(coordinator.flush())
}
