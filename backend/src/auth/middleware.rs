//! Middleware for protecting authenticated routes.
//!
//! This module contains logic for validating access tokens and injecting the
//! resolved identity into the request context for downstream handlers.

use crate::api::common::service_error_to_http;
use crate::errors::ServiceError;
use crate::utils::jwt::TokenService;
use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Header carrying the access token, as `"<scheme> <token>"`.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Access-token authentication middleware.
///
/// On success the verified claims are added to the request extensions so
/// handlers can resolve the subject id.
pub async fn verify_token(
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let Some(header) = request
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|header| header.to_str().ok())
    else {
        return Err(service_error_to_http(ServiceError::missing_token(
            "No Token provided or invalid format!",
        )));
    };

    // The header value is "<scheme> <token>"; only the token segment matters.
    let Some(token) = header.split_whitespace().nth(1) else {
        return Err(service_error_to_http(ServiceError::missing_token(
            "No Token provided!",
        )));
    };

    let Some(tokens) = request.extensions().get::<TokenService>().cloned() else {
        return Err(service_error_to_http(ServiceError::internal(
            "Token service is not configured",
        )));
    };

    match tokens.verify(token) {
        Ok(claims) => {
            tracing::debug!(subject = %claims.user_id(), "token accepted");
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(error) => Err(service_error_to_http(error.into())),
    }
}
