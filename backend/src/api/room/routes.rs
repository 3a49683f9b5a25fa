//! Defines the HTTP routes for room lookups.
//!
//! All room routes are token-protected.

use super::handlers::{get_invoices_by_room, get_room_invoices, list_rooms};
use crate::auth::middleware::verify_token;
use axum::{Router, middleware, routing::get};

/// Creates the room router with all room-related routes
pub fn room_router() -> Router {
    Router::new()
        .route("/", get(list_rooms))
        .route("/{room_id}", get(get_invoices_by_room))
        .route("/{room_id}/invoices", get(get_room_invoices))
        .route_layer(middleware::from_fn(verify_token))
}
