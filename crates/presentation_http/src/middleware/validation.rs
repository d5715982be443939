//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using the validator crate.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{ApiError, FieldError};

/// A JSON extractor that also validates the request body
///
/// Malformed JSON is rejected with `400 bad_request`; validation failures
/// with `400 validation_error` listing each offending field.
///
/// # Example
///
/// ```ignore
/// use validator::Validate;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Validate)]
/// struct MyRequest {
///     #[validate(length(min = 1, max = 1000))]
///     message: String,
/// }
///
/// async fn handler(ValidatedJson(req): ValidatedJson<MyRequest>) {
///     // req is validated
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::Validation(field_errors(&e)))?;

        Ok(Self(value))
    }
}

/// Flatten validator errors into a field list, sorted by field name
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct TestRequest {
        #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
        message: String,
        #[validate(range(min = 0, max = 10, message = "must be between 0 and 10"))]
        #[serde(default)]
        count: u32,
    }

    async fn test_handler(ValidatedJson(req): ValidatedJson<TestRequest>) -> String {
        req.message
    }

    fn create_test_app() -> Router {
        Router::new().route("/test", post(test_handler))
    }

    async fn post_json(body: &'static str) -> axum::response::Response {
        create_test_app()
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/test")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn valid_request_passes() {
        let response = post_json(r#"{"message": "hello"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_message_rejected() {
        let response = post_json(r#"{"message": ""}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn count_out_of_range_rejected() {
        let response = post_json(r#"{"message": "hello", "count": 100}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_json_rejected() {
        let response = post_json(r#"{"message": not valid json}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn field_errors_are_sorted_and_carry_messages() {
        let request = TestRequest {
            message: String::new(),
            count: 11,
        };
        let errors = request.validate().unwrap_err();
        let fields = field_errors(&errors);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "count");
        assert_eq!(fields[0].message, "must be between 0 and 10");
        assert_eq!(fields[1].field, "message");
    }
}
