//! Minimal `tracing` setup for tools and tests.

use tracing_subscriber::EnvFilter;

/// Install a plain subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once: later calls are no-ops, which lets every test
/// call it without coordinating.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
