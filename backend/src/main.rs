//! Main entry point for the rental billing backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall
//! structure.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::fmt::init;
use utils::jwt::TokenService;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();
    let tokens = TokenService::new(&config);

    let app = Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .nest(
            "/invoices",
            api::invoice::routes::invoice_router(config.max_upload_bytes),
        )
        .nest("/rooms", api::room::routes::room_router())
        .layer(Extension(pool))
        .layer(Extension(tokens))
        .layer(Extension(config.clone()));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting rental billing server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "Rental Billing Backend",
        "version": "0.1.0"
    }))
}
