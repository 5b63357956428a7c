//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type at the HTTP edge. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Server-class variants keep their internal detail for logging only.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::StoreError;

/// Public message returned for contact submission failures.
pub const CONTACT_FAILURE_MESSAGE: &str = "Failed to submit contact form";

/// Public message returned for every other server-side failure.
pub const INTERNAL_FAILURE_MESSAGE: &str = "internal server error";

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1003,
///     "message": "Failed to deserialize the JSON body into the target type: missing field `email`",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                    |
/// |-----------|------------|--------------------------------|
/// | 1000–1999 | Request    | 400 / 415 / 422                |
/// | 3000–3999 | Server     | 500 Internal Server Error      |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body is not syntactically valid JSON.
    #[error("{0}")]
    InvalidJson(String),

    /// Body was sent without a JSON content type.
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Body is valid JSON but does not match the expected schema.
    #[error("{0}")]
    Validation(String),

    /// Contact form processing failed after validation.
    #[error("contact submission failed: {0}")]
    ContactSubmission(String),

    /// Document store failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidJson(_) => 1001,
            Self::UnsupportedMediaType(_) => 1002,
            Self::Validation(_) => 1003,
            Self::Internal(_) => 3000,
            Self::ContactSubmission(_) => 3001,
            Self::Persistence(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ContactSubmission(_) | Self::Persistence(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the message shown to the caller.
    ///
    /// Server-class variants never expose their inner detail.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidJson(msg) | Self::UnsupportedMediaType(msg) | Self::Validation(msg) => {
                msg.clone()
            }
            Self::ContactSubmission(_) => CONTACT_FAILURE_MESSAGE.to_string(),
            Self::Persistence(_) | Self::Internal(_) => INTERNAL_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => Self::Validation(text),
            JsonRejection::JsonSyntaxError(_) => Self::InvalidJson(text),
            JsonRejection::MissingJsonContentType(_) => Self::UnsupportedMediaType(text),
            _ => Self::InvalidJson(text),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_map_to_client_statuses() {
        assert_eq!(
            ApiError::InvalidJson(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedMediaType(String::new()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::Validation(String::new()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn server_errors_hide_internal_detail() {
        let err = ApiError::ContactSubmission("connection refused on 10.0.0.5".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), CONTACT_FAILURE_MESSAGE);

        let err = ApiError::Persistence("relation \"documents\" does not exist".to_string());
        assert_eq!(err.public_message(), INTERNAL_FAILURE_MESSAGE);
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = ApiError::Validation("missing field `email`".to_string());
        assert_eq!(err.public_message(), "missing field `email`");
        assert_eq!(err.error_code(), 1003);
    }

    #[test]
    fn store_error_becomes_persistence_error() {
        let err: ApiError = StoreError::Closed.into();
        assert!(matches!(err, ApiError::Persistence(_)));
    }
}
