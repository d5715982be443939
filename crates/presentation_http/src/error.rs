//! API error handling
//!
//! Maps application errors onto HTTP statuses with a uniform JSON body.
//! Internal error details are logged, never returned.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// A field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::RateLimited => "rate_limited",
            Self::BadGateway(_) => "bad_gateway",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::BadGateway(msg)
            | Self::ServiceUnavailable(msg) => (msg, None),
            Self::Validation(fields) => (
                "Validation failed".to_string(),
                serde_json::to_value(fields).ok(),
            ),
            Self::RateLimited => ("Rate limit exceeded".to_string(), None),
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                ("An internal error occurred".to_string(), None)
            },
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } | DomainError::NoForecastForDate(_) => {
                Self::NotFound(err.to_string())
            },
            DomainError::UnsupportedDateRange { .. }
            | DomainError::ValidationError(_)
            | DomainError::InvalidTimezone(_) => Self::BadRequest(err.to_string()),
            DomainError::EmptyForecastData | DomainError::InvalidWeatherRecord(_) => {
                Self::BadGateway(err.to_string())
            },
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => e.into(),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::NotFound(_) | ApplicationError::LocationNotFound(_) => {
                Self::NotFound(err.to_string())
            },
            ApplicationError::ProviderUnavailable(_) => Self::BadGateway(err.to_string()),
            ApplicationError::AuthFailed => Self::ServiceUnavailable(err.to_string()),
            ApplicationError::InvalidOperation(msg) => Self::BadRequest(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
