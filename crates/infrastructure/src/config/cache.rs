//! Weather cache configuration.

use serde::{Deserialize, Serialize};

/// Cache TTL and background sweep settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds (default: 3 hours)
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Interval between expired-entry sweeps in seconds (default: 10 minutes)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

const fn default_ttl() -> u64 {
    3 * 60 * 60 // 3 hours
}

const fn default_sweep_interval() -> u64 {
    10 * 60 // 10 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}
