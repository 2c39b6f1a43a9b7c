//! Logging setup for the anthro binaries.
//!
//! The engine itself only emits `tracing` events; installing a
//! subscriber is left to the binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber, filtering at `default_level`
/// (debug, info, warn, error) unless RUST_LOG is set.
///
/// Events go to stderr; stdout carries reports only.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
