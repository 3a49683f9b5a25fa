//! Invoice API endpoint definitions and handlers.

pub mod handlers;
pub mod models;
pub mod routes;
