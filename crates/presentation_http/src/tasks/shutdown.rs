//! Graceful shutdown deadline

use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

/// Resolve `timeout` after `signal` flips to `true`.
///
/// Raced against the draining server so open connections cannot hold the
/// process past the configured shutdown timeout. Never resolves if the
/// sender is dropped without signalling.
pub async fn drain_deadline(mut signal: watch::Receiver<bool>, timeout: Duration) {
    if signal.wait_for(|fired| *fired).await.is_err() {
        std::future::pending::<()>().await;
    }
    debug!(timeout_secs = timeout.as_secs(), "Shutdown drain deadline started");
    tokio::time::sleep(timeout).await;
}
