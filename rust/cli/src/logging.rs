//! Process-wide `tracing` subscriber for the `blackjack` binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set: shoe warnings only.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize logging for the application. Events go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_logging() -> Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("Failed to set global default subscriber: {}", e))
}
