//! Telemetry helpers for structured logging.
//!
//! The qew only emits `tracing` events; installing a subscriber is left to the
//! application. These helpers cover the common case.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "qew=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`]. Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_FILTER);
}

/// Like [`init_tracing`] but with a caller-chosen fallback filter, e.g.
/// `"qew=debug"` to see every admission attempt. Returns whether this call
/// installed the subscriber.
pub fn init_tracing_with(fallback: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}
