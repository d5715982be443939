//! Health check handlers

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Plain-text landing page
pub async fn root() -> &'static str {
    "Welcome to the Smart Event Planner API! Use /events or /weather endpoints."
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Smart Event Planner API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "OK");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn root_points_to_endpoints() {
        assert!(root().await.contains("/events"));
    }
}
