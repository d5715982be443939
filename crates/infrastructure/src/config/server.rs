//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Maximum body size for JSON requests in bytes (default: 64KB)
    #[serde(default = "default_max_body_json")]
    pub max_body_size_json_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_shutdown_timeout() -> u64 {
    30
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_filter() -> String {
    "event_planner=info,presentation_http=info,application=info,tower_http=info".to_string()
}

const fn default_max_body_json() -> usize {
    64 * 1024
}

impl ServerConfig {
    /// Socket address string for binding
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            log_format: default_log_format(),
            log_filter: default_log_filter(),
            max_body_size_json_bytes: default_max_body_json(),
        }
    }
}
