//! Filesystem delete primitives.
//!
//! The registry never sees a delete failure: both operations are best
//! effort. A missing file, a permission error or a failed spawn is logged at
//! debug level and dropped.

use std::io;
use std::path::Path;

use tracing::debug;

/// Delete primitives consumed by the registry.
pub trait Unlinker: Send + Sync {
    /// Request deletion without waiting for it to complete.
    fn unlink_attempt(&self, path: &Path);

    /// Delete and block until the filesystem call returns.
    fn unlink_sync_attempt(&self, path: &Path);
}

/// [`Unlinker`] backed by the real filesystem.
///
/// `unlink_attempt` runs `tokio::fs::remove_file` on the ambient tokio
/// runtime when called from inside one, and on a detached thread otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsUnlinker;

impl Unlinker for FsUnlinker {
    fn unlink_attempt(&self, path: &Path) {
        let path = path.to_path_buf();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let _ = handle.spawn(async move {
                if let Err(err) = tokio::fs::remove_file(&path).await {
                    log_failure(&path, &err);
                }
            });
            return;
        }

        let spawned = std::thread::Builder::new()
            .name("temppath-unlink".into())
            .spawn(move || remove_quietly(&path));
        if let Err(err) = spawned {
            debug!(error = %err, "failed to spawn unlink thread");
        }
    }

    fn unlink_sync_attempt(&self, path: &Path) {
        remove_quietly(path);
    }
}

fn remove_quietly(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        log_failure(path, &err);
    }
}

fn log_failure(path: &Path, err: &io::Error) {
    debug!(path = %path.display(), kind = ?err.kind(), error = %err, "unlink failed, ignoring");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_until_gone(path: &Path) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if !path.exists() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        !path.exists()
    }

    #[test]
    fn sync_unlink_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.tmp");
        std::fs::write(&path, b"x").unwrap();

        FsUnlinker.unlink_sync_attempt(&path);
        assert!(!path.exists());
    }

    #[test]
    fn sync_unlink_missing_file_is_swallowed() {
        let (logs, _guard) = temppath_core::logging::capture_logs();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-created");

        FsUnlinker.unlink_sync_attempt(&path);
        let events = logs.matching("unlink failed");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("kind"), Some("NotFound"));
    }

    #[test]
    fn async_unlink_without_runtime_uses_thread() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.tmp");
        std::fs::write(&path, b"x").unwrap();

        FsUnlinker.unlink_attempt(&path);
        assert!(wait_until_gone(&path));
    }

    #[tokio::test]
    async fn async_unlink_inside_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.tmp");
        std::fs::write(&path, b"x").unwrap();

        FsUnlinker.unlink_attempt(&path);
        for _ in 0..500 {
            if !path.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn async_unlink_missing_file_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        FsUnlinker.unlink_attempt(&dir.path().join("missing"));
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
