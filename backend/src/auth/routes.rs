//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration, login, and logout. They are
//! designed to be integrated into the main Axum router.

use crate::auth::handlers::{login, logout, register};
use crate::auth::middleware::verify_token;
use axum::{Router, middleware, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout).layer(middleware::from_fn(verify_token)))
}
