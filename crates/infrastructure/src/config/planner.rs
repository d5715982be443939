//! Planner configuration.

use serde::{Deserialize, Serialize};

/// Date resolution and alternative-date search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// IANA timezone that defines "today"
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Days searched for alternatives when a request names none
    #[serde(default = "default_alternative_window")]
    pub default_alternative_window: u32,

    /// Concurrent weather lookups during an alternative search
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,

    /// Per-date lookup timeout in seconds
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

const fn default_alternative_window() -> u32 {
    7
}

const fn default_max_concurrent_lookups() -> usize {
    4
}

const fn default_lookup_timeout() -> u64 {
    10
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            default_alternative_window: default_alternative_window(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
            lookup_timeout_secs: default_lookup_timeout(),
        }
    }
}
