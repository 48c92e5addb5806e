//! Logging bootstrap
//!
//! The engine only emits `tracing` events; installing a subscriber is the
//! embedding shell's decision. This helper gives it the standard setup.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, honoring `RUST_LOG`
///
/// Defaults to `warn` when `RUST_LOG` is unset. Calling more than once is
/// harmless; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
