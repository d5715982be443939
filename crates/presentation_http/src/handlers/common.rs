//! Shared response envelope and parsing helpers for HTTP handlers

use chrono::NaiveDate;
use domain::value_objects::EventId;
use serde::Serialize;

use crate::error::ApiError;

/// Success envelope: `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    /// Envelope without a payload
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parse an event id from a path segment; malformed ids are unknown events
pub fn parse_event_id(raw: &str) -> Result<EventId, ApiError> {
    EventId::parse(raw).map_err(|_| ApiError::NotFound(format!("Event {raw} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_requires_iso_shape() {
        assert_eq!(parse_date("2026-07-04"), NaiveDate::from_ymd_opt(2026, 7, 4));
        assert_eq!(parse_date("2026-7-4"), None);
        assert_eq!(parse_date("04/07/2026"), None);
        assert_eq!(parse_date("2026-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn envelope_serialization() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2]).with_count(2)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "count": 2, "data": [1, 2]}));

        let json = serde_json::to_value(ApiResponse::message_only("done")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "message": "done"}));
    }

    #[test]
    fn malformed_event_id_is_not_found() {
        assert!(matches!(parse_event_id("abc"), Err(ApiError::NotFound(_))));
        assert!(parse_event_id("0190b2a4-5f3e-7c1d-9a2b-3c4d5e6f7a8b").is_ok());
    }
}
