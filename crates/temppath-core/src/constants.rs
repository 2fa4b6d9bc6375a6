//! Package-level constants.

/// Current version of temppath (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Literal marker that opens every generated suffix.
pub const TEMP_TAG: &str = "tmp-";

/// Number of trailing timestamp digits embedded in a suffix.
pub const TIMESTAMP_DIGITS: usize = 10;

/// Number of random bytes embedded in a suffix (two hex chars each).
pub const RANDOM_BYTES: usize = 3;

/// Full suffix length: `.` + tag + timestamp digits + hex digits.
pub const SUFFIX_LEN: usize = 1 + TEMP_TAG.len() + TIMESTAMP_DIGITS + RANDOM_BYTES * 2;

/// Default basename length ceiling used by the truncator.
pub const DEFAULT_LIMIT_BASENAME_LENGTH: usize = 128;

/// Default number of allocation attempts before giving up on collisions.
pub const DEFAULT_MAX_ALLOCATE_ATTEMPTS: u32 = 128;
