#![allow(missing_docs, unused_results)]

//! The installed exit hook, against the process-wide registry.
//!
//! Kept in its own test binary: `install` succeeds once per process.

use assert_matches::assert_matches;
use temppath_core::TempError;
use temppath_registry::{global, install};

#[test]
fn install_once_then_flush_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("state.json");

    let (doomed, _) = global().allocate_default(target.to_str().unwrap()).unwrap();
    let (kept, _) = global()
        .allocate(target.to_str().unwrap(), temppath_core::naming::create, false)
        .unwrap();
    std::fs::write(doomed.as_path(), b"x").unwrap();
    std::fs::write(kept.as_path(), b"x").unwrap();

    let guard = install().unwrap();
    assert_matches!(install(), Err(TempError::ExitHookInstalled));
    assert!(!guard.coordinator().has_flushed());

    drop(guard);

    assert!(!doomed.as_path().exists());
    assert!(kept.as_path().exists());
    assert!(global().is_empty());
}
