//! Temp path name generation.
//!
//! A generated temp path is the base path with a 21-character suffix:
//!
//! ```text
//! <base>.tmp-<10 timestamp digits><6 hex digits>
//! ```
//!
//! The timestamp alone is not enough to keep names apart: two calls within
//! the same millisecond produce the same digits. The 24 random bits bound the
//! collision probability; the registry retries on the rare clash.
//!
//! [`create_with`] and [`format_suffix`] take the time and random bytes as
//! arguments so the layout can be tested deterministically. [`create`] wraps
//! them with the wall clock and the thread-local CSPRNG.

use std::fmt::Write as _;

use crate::constants::{RANDOM_BYTES, SUFFIX_LEN, TEMP_TAG, TIMESTAMP_DIGITS};

/// Modulus that keeps the last [`TIMESTAMP_DIGITS`] decimal digits.
#[allow(clippy::cast_possible_truncation)]
const TIMESTAMP_MODULUS: i64 = 10_i64.pow(TIMESTAMP_DIGITS as u32);

/// Build a temp path candidate for `base_path` using the current time and
/// fresh random bytes.
#[must_use]
pub fn create(base_path: &str) -> String {
    let timestamp_ms = chrono::Utc::now().timestamp_millis();
    let random: [u8; RANDOM_BYTES] = rand::random();
    create_with(base_path, timestamp_ms, random)
}

/// Build a temp path candidate from explicit time and randomness.
#[must_use]
pub fn create_with(base_path: &str, timestamp_ms: i64, random: [u8; RANDOM_BYTES]) -> String {
    let mut out = String::with_capacity(base_path.len() + SUFFIX_LEN);
    out.push_str(base_path);
    out.push_str(&format_suffix(timestamp_ms, random));
    out
}

/// Format the `.tmp-<digits><hex>` suffix.
///
/// Keeps the last ten decimal digits of the millisecond timestamp, zero
/// padded, followed by the random bytes as lowercase hex.
#[must_use]
pub fn format_suffix(timestamp_ms: i64, random: [u8; RANDOM_BYTES]) -> String {
    let digits = timestamp_ms.rem_euclid(TIMESTAMP_MODULUS);
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    suffix.push('.');
    suffix.push_str(TEMP_TAG);
    let _ = write!(suffix, "{digits:0width$}", width = TIMESTAMP_DIGITS);
    for byte in random {
        let _ = write!(suffix, "{byte:02x}");
    }
    suffix
}

/// Whether `s` is exactly a generated suffix (`.tmp-` + 10 digits + 6 lowercase hex).
#[must_use]
pub fn is_suffix(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('.').and_then(|r| r.strip_prefix(TEMP_TAG)) else {
        return false;
    };
    let bytes = rest.as_bytes();
    if bytes.len() != TIMESTAMP_DIGITS + RANDOM_BYTES * 2 {
        return false;
    }
    let (digits, hex) = bytes.split_at(TIMESTAMP_DIGITS);
    digits.iter().all(u8::is_ascii_digit)
        && hex
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
