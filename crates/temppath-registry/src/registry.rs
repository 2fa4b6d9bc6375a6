//! Ownership registry for temp paths.
//!
//! Maps each registered [`TempPath`] to a purge flag. Only purge-eligible
//! entries are ever deleted from disk; a disposer releases an entry without
//! touching the file.
//!
//! The entries live behind a [`parking_lot::Mutex`]. The lock is held only
//! for map lookups and updates, never while calling the caller's creator or
//! the [`Unlinker`], so an entry is always removed before its delete is
//! issued.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use temppath_core::constants::{DEFAULT_LIMIT_BASENAME_LENGTH, DEFAULT_MAX_ALLOCATE_ATTEMPTS};
use temppath_core::naming;
use temppath_core::truncate::truncate;
use temppath_core::{Result, TempError, TempPath};
use temppath_settings::TempSettings;
use tracing::{debug, warn};

use crate::fs::{FsUnlinker, Unlinker};

type Entries = Arc<Mutex<HashMap<TempPath, bool>>>;

/// Process-lifetime registry of owned temp paths.
pub struct TempRegistry {
    entries: Entries,
    limit_basename_length: usize,
    max_attempts: u32,
    unlinker: Arc<dyn Unlinker>,
}

impl TempRegistry {
    /// Create an empty registry.
    pub fn new(
        limit_basename_length: usize,
        max_attempts: u32,
        unlinker: Arc<dyn Unlinker>,
    ) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            limit_basename_length,
            max_attempts,
            unlinker,
        }
    }

    /// Create a registry from validated settings.
    pub fn from_settings(settings: &TempSettings, unlinker: Arc<dyn Unlinker>) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(
            settings.truncation.limit_basename_length,
            settings.registry.max_allocate_attempts,
            unlinker,
        ))
    }

    /// Basename length ceiling applied to every candidate.
    pub fn limit_basename_length(&self) -> usize {
        self.limit_basename_length
    }

    /// Candidates tried before [`TempError::CollisionExhausted`].
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Register a fresh temp path for `target`.
    ///
    /// Each attempt asks `creator` for a candidate, truncates it and checks
    /// it against the registry. A candidate that is already registered is
    /// discarded and `creator` is called again, up to the configured attempt
    /// count.
    pub fn allocate<F>(
        &self,
        target: &str,
        mut creator: F,
        purge: bool,
    ) -> Result<(TempPath, Disposer)>
    where
        F: FnMut(&str) -> String,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = TempPath::from(truncate(&creator(target), self.limit_basename_length));

            let mut entries = self.entries.lock();
            if entries.contains_key(&candidate) {
                drop(entries);
                debug!(path = %candidate, attempt, "temp path collision, retrying");
                continue;
            }
            let _ = entries.insert(candidate.clone(), purge);
            drop(entries);

            debug!(path = %candidate, purge, attempt, "registered temp path");
            let disposer = Disposer {
                entries: Arc::clone(&self.entries),
                path: candidate.clone(),
            };
            return Ok((candidate, disposer));
        }

        warn!(
            target_path = target,
            attempts = self.max_attempts,
            "temp path allocation exhausted"
        );
        Err(TempError::CollisionExhausted {
            target: target.to_owned(),
            attempts: self.max_attempts,
        })
    }

    /// Register a purge-eligible temp path named by [`naming::create`].
    pub fn allocate_default(&self, target: &str) -> Result<(TempPath, Disposer)> {
        self.allocate(target, naming::create, true)
    }

    /// Remove `path` from the registry without deleting it.
    ///
    /// Returns whether an entry was removed.
    pub fn release(&self, path: &str) -> bool {
        release_entry(&self.entries, path)
    }

    /// Unregister a purge-eligible `path` and request its deletion without
    /// waiting.
    ///
    /// No-op unless `path` is registered with purge enabled. Returns whether
    /// a delete was issued.
    pub fn purge(&self, path: &str) -> bool {
        let Some(path) = self.take_eligible(path) else {
            return false;
        };
        debug!(path = %path, "purging temp path");
        self.unlinker.unlink_attempt(path.as_path());
        true
    }

    /// Like [`purge`](Self::purge), but blocks until the delete returns.
    pub fn purge_sync(&self, path: &str) -> bool {
        let Some(path) = self.take_eligible(path) else {
            return false;
        };
        debug!(path = %path, "purging temp path synchronously");
        self.unlinker.unlink_sync_attempt(path.as_path());
        true
    }

    /// Purge every eligible entry synchronously, then clear the registry.
    ///
    /// Entries registered without purge are dropped from the registry but
    /// their files are left alone. Eligible entries registered while the
    /// purge runs are purged too. Returns the number of deletes issued.
    pub fn purge_all_sync(&self) -> usize {
        let mut purged = 0;
        loop {
            let batch = {
                let mut entries = self.entries.lock();
                let eligible: Vec<TempPath> = entries
                    .iter()
                    .filter(|(_, purge)| **purge)
                    .map(|(path, _)| path.clone())
                    .collect();
                if eligible.is_empty() {
                    let released = entries.len();
                    entries.clear();
                    drop(entries);
                    debug!(purged, released, "purged all temp paths");
                    return purged;
                }
                for path in &eligible {
                    let _ = entries.remove(path);
                }
                eligible
            };

            for path in batch {
                debug!(path = %path, "purging temp path synchronously");
                self.unlinker.unlink_sync_attempt(path.as_path());
                purged += 1;
            }
        }
    }

    /// Whether `path` is registered.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.lock().contains_key(path)
    }

    /// Whether `path` is registered with purge enabled.
    pub fn is_purge_eligible(&self, path: &str) -> bool {
        self.entries.lock().get(path).copied().unwrap_or(false)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Sorted snapshot of registered paths.
    pub fn paths(&self) -> Vec<TempPath> {
        let mut paths: Vec<TempPath> = self.entries.lock().keys().cloned().collect();
        paths.sort();
        paths
    }

    fn take_eligible(&self, path: &str) -> Option<TempPath> {
        let mut entries = self.entries.lock();
        if entries.get(path).copied() != Some(true) {
            return None;
        }
        entries.remove_entry(path).map(|(key, _)| key)
    }
}

impl Default for TempRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_LIMIT_BASENAME_LENGTH,
            DEFAULT_MAX_ALLOCATE_ATTEMPTS,
            Arc::new(FsUnlinker),
        )
    }
}

impl fmt::Debug for TempRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempRegistry")
            .field("entries", &self.len())
            .field("limit_basename_length", &self.limit_basename_length)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

/// Releases one registry entry without deleting its file.
///
/// Dropping a disposer does nothing; call [`dispose`](Self::dispose).
#[derive(Clone)]
pub struct Disposer {
    entries: Entries,
    path: TempPath,
}

impl Disposer {
    /// The path this disposer releases.
    pub fn path(&self) -> &TempPath {
        &self.path
    }

    /// Remove the entry from the registry. Idempotent.
    ///
    /// Returns whether an entry was removed by this call.
    pub fn dispose(&self) -> bool {
        release_entry(&self.entries, &self.path)
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer").field("path", &self.path).finish()
    }
}

fn release_entry(entries: &Mutex<HashMap<TempPath, bool>>, path: &str) -> bool {
    let removed = entries.lock().remove(path).is_some();
    if removed {
        debug!(path, "released temp path");
    }
    removed
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
