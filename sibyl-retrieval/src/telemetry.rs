//! Process-wide tracing setup for host binaries.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Reads `RUST_LOG` for filtering,
/// defaulting to `info`. Call once at process startup; later calls are
/// no-ops so embedding hosts and tests can both call it safely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
