//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Weather provider could not be reached or answered with a server error
    #[error("Weather service is currently unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider does not know the requested location
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Provider rate limit exceeded
    #[error("Weather API rate limit exceeded. Please try again later")]
    RateLimited,

    /// Provider rejected our credentials
    #[error("Invalid API key for weather service")]
    AuthFailed,

    /// Requested resource does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Operation not allowed in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    ///
    /// Informational only; nothing in the application retries on its own.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::ProviderUnavailable(_))
    }

    /// Whether the error originated at the weather provider
    pub const fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_)
                | Self::LocationNotFound(_)
                | Self::RateLimited
                | Self::AuthFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_convert() {
        let err: ApplicationError = DomainError::EmptyForecastData.into();
        assert!(matches!(err, ApplicationError::Domain(_)));
        assert_eq!(err.to_string(), "Forecast data is empty");
    }

    #[test]
    fn retryable_errors() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::ProviderUnavailable("timeout".into()).is_retryable());
        assert!(!ApplicationError::AuthFailed.is_retryable());
        assert!(!ApplicationError::LocationNotFound("Atlantis".into()).is_retryable());
    }

    #[test]
    fn provider_failures() {
        assert!(ApplicationError::AuthFailed.is_provider_failure());
        assert!(!ApplicationError::NotFound("Event".into()).is_provider_failure());
        assert!(!ApplicationError::Domain(DomainError::EmptyForecastData).is_provider_failure());
    }
}
