//! Defines the HTTP routes for the invoice lifecycle.
//!
//! All invoice routes are token-protected. The payment-proof route carries
//! its own body-size ceiling for the uploaded image.

use super::handlers::{
    create_invoice, delete_invoice, get_receipt, update_invoice, upload_payment_proof,
};
use crate::auth::middleware::verify_token;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};

/// Creates the invoice router with all invoice-related routes
pub fn invoice_router(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", post(create_invoice))
        .route("/{invoice_id}", put(update_invoice).delete(delete_invoice))
        .route("/{invoice_id}/receipt", get(get_receipt))
        .route(
            "/{invoice_id}/payment-proof",
            post(upload_payment_proof).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route_layer(middleware::from_fn(verify_token))
}
