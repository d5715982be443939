//! Weather cache sweep task
//!
//! Periodically drops expired cache entries that were never read again.

use std::sync::Arc;
use std::time::Duration;

use application::services::WeatherCache;
use tracing::{debug, info};

/// Spawn a background task that purges expired weather cache entries.
///
/// The first sweep runs one `interval` after startup. Returns a `JoinHandle`
/// that is aborted on shutdown.
///
/// # Example
///
/// ```ignore
/// let sweep_handle = spawn_cache_sweep_task(cache, Duration::from_secs(600));
///
/// // On shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_cache_sweep_task(
    cache: Arc<WeatherCache>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        interval_secs = interval.as_secs(),
        ttl_secs = cache.ttl().as_secs(),
        "Starting weather cache sweep task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.purge_expired();
            if removed > 0 {
                info!(removed_count = removed, "Swept expired weather cache entries");
            } else {
                debug!("No expired weather cache entries");
            }
        }
    })
}
