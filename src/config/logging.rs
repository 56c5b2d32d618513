//! Tracing initialization
//!
//! Diagnostic events go to stderr so they never mix with command output or
//! CSV written to stdout. `RUST_LOG` wins over the configured level.

use tracing_subscriber::EnvFilter;

/// Install the process-wide tracing subscriber
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
