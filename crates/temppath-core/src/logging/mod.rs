//! Structured logging with `tracing`.
//!
//! Library code only emits events; installing a subscriber is left to the
//! host application. [`init_subscriber`] is a convenience for binaries and
//! tests that do not set one up themselves.
//!
//! Events emitted by temppath:
//!
//! | Level | Event |
//! |---|---|
//! | `debug` | allocate, release, purge, collision retry, truncation fallback, delete failure |
//! | `warn` | allocation attempts exhausted |
//! | `info` | exit flush |

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

use tracing_subscriber::EnvFilter;

/// Build the filter for [`init_subscriber`].
///
/// A non-empty `rust_log` directive wins over the configured `level`.
pub fn build_filter(level: &str, rust_log: Option<&str>) -> EnvFilter {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(level),
    }
}

/// Initialize the global tracing subscriber with stderr output.
///
/// `RUST_LOG` takes precedence over `level` when set. Subsequent calls are
/// no-ops.
pub fn init_subscriber(level: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, rust_log.as_deref());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails when a global subscriber already exists
    let _ = subscriber.try_init();
}
