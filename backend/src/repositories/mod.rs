//! Central module for data access repositories.
//!
//! Each repository owns the persistence operations for one entity and borrows
//! the shared connection pool for the duration of a single request.

pub mod invoice_repository;
pub mod room_repository;
pub mod user_repository;
