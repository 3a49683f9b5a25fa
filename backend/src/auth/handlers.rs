//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user registration,
//! login, and logout, and interact with the `auth::service` for core
//! business logic.

use crate::api::common::service_error_to_http;
use crate::auth::models::{
    LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse,
};
use crate::auth::service::AuthService;
use crate::utils::jwt::TokenService;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(tokens): Extension<TokenService>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ResponseJson<RegisterResponse>, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &tokens);

    match auth_service.register(payload).await {
        Ok((user, token)) => Ok(ResponseJson(RegisterResponse {
            message: "User was registered successfully!".to_string(),
            user,
            token,
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(tokens): Extension<TokenService>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &tokens);

    match auth_service.login(payload).await {
        Ok((user, token)) => Ok(ResponseJson(LoginResponse {
            user,
            access_token: token,
            code: 200,
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout request (client-side token invalidation).
///
/// Tokens are stateless, so there is nothing to revoke server-side; this
/// reports success unconditionally.
#[axum::debug_handler]
pub async fn logout() -> Result<ResponseJson<LogoutResponse>, (StatusCode, String)> {
    Ok(ResponseJson(LogoutResponse {
        message: "User was logout successfully!".to_string(),
        code: 200,
    }))
}
