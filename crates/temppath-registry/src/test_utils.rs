//! Test doubles for the filesystem collaborator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::fs::Unlinker;

/// Which delete primitive a request went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlinkMode {
    /// `unlink_attempt`.
    NonBlocking,
    /// `unlink_sync_attempt`.
    Blocking,
}

/// [`Unlinker`] that records requests instead of touching the filesystem.
#[derive(Clone, Default)]
pub struct RecordingUnlinker {
    requests: Arc<Mutex<Vec<(UnlinkMode, PathBuf)>>>,
}

impl RecordingUnlinker {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests, in issue order.
    pub fn requests(&self) -> Vec<(UnlinkMode, PathBuf)> {
        self.requests.lock().clone()
    }

    /// Paths requested through the given primitive, sorted.
    pub fn paths(&self, mode: UnlinkMode) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .requests
            .lock()
            .iter()
            .filter(|(m, _)| *m == mode)
            .map(|(_, p)| p.clone())
            .collect();
        paths.sort();
        paths
    }

    /// Number of requests issued.
    pub fn count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Unlinker for RecordingUnlinker {
    fn unlink_attempt(&self, path: &Path) {
        self.requests
            .lock()
            .push((UnlinkMode::NonBlocking, path.to_path_buf()));
    }

    fn unlink_sync_attempt(&self, path: &Path) {
        self.requests
            .lock()
            .push((UnlinkMode::Blocking, path.to_path_buf()));
    }
}
