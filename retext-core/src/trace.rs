//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RETEXT_LOG`, falling back to `RUST_LOG`, then to
/// `warn`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = std::env::var("RETEXT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
}
