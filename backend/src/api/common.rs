//! Error handling utilities for API responses.
//!
//! Provides the conversion between service-layer errors and HTTP responses.
//!
//! # Error Handling Flow
//! 1. Service layer returns a domain-specific `ServiceError`
//! 2. `service_error_to_http` converts it to the appropriate HTTP response
//! 3. Internal detail is logged and replaced with a generic message
//!
//! All errors return a JSON body containing:
//! - `message`: Human-readable message
//! - `code`: The HTTP status code, mirrored into the body

use crate::errors::ServiceError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standard error body for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub message: String,
    /// HTTP status code mirrored into the body
    pub code: u16,
}

/// Builds an error response with the given status and message.
pub fn error_message(status: StatusCode, message: impl Into<String>) -> (StatusCode, String) {
    let body = ErrorBody {
        message: message.into(),
        code: status.as_u16(),
    };
    (
        status,
        serde_json::to_string(&body).unwrap_or_else(|_| "{}".to_string()),
    )
}

/// Converts ServiceError to the appropriate HTTP response.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let status = match &error {
        ServiceError::Validation { .. } | ServiceError::DuplicateEmail => StatusCode::BAD_REQUEST,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::InvalidCredentials | ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden { .. } | ServiceError::MissingToken { .. } => StatusCode::FORBIDDEN,
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ServiceError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    // Raw internal detail never reaches the client.
    let message = match &error {
        ServiceError::Database { .. } | ServiceError::Internal { .. } => {
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    error_message(status, message)
}

/// Formats validator::ValidationErrors into a single message string.
pub fn validation_errors_to_message(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error.message.as_ref().unwrap_or(&"Invalid value".into())
                )
            })
        })
        .collect::<Vec<String>>()
        .join(", ")
}
