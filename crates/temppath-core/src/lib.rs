//! # temppath-core
//!
//! Foundation types and pure algorithms for temppath.
//!
//! - **`TempPath`**: newtype over the string value of a generated temp path
//! - **Naming**: [`naming::create`] appends a `.tmp-<timestamp><random>` suffix
//! - **Truncation**: [`truncate::truncate`] keeps basenames under a length limit
//!   while preserving the extension and the generated suffix
//! - **Errors**: [`TempError`] via `thiserror`
//! - **Logging**: `tracing` subscriber setup and capture utilities for tests

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod logging;
pub mod naming;
pub mod path;
pub mod truncate;

pub use errors::{Result, TempError};
pub use path::TempPath;
