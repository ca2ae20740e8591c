//! Optional default tracing subscriber for embedders.

use tracing_subscriber::EnvFilter;

/// Install a process-wide `tracing` subscriber, filtered by the
/// `AOPMINER_LOG` environment variable (default `info`). Returns false
/// when a subscriber is already installed, in which case the embedder's
/// subscriber stays in charge.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_env("AOPMINER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
