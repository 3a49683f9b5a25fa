//! Room API endpoint definitions and handlers.
//!
//! Rooms are read-only here; these routes expose rooms together with the
//! invoices they own.

pub mod handlers;
pub mod models;
pub mod routes;
