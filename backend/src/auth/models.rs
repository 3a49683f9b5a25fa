//! Data structures for authentication-related entities.
//!
//! This module defines the request and response payloads of the registration,
//! login, and logout endpoints.

use crate::database::models::User;
use serde::{Deserialize, Serialize};

/// Registration request payload.
///
/// Every field is optional on the wire so that an absent key is reported as a
/// 400 by the service; empty strings pass this check.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Registration response containing the created user and a fresh token
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

/// Login request payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response containing the user record and an access token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub code: u16,
}

/// Logout response; logout is client-side only and always succeeds
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
    pub code: u16,
}
