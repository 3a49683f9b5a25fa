//! Central module for the core business logic services.
//!
//! Services orchestrate repositories and enforce the billing rules; HTTP
//! handlers stay thin and delegate here.

pub mod invoice_service;
pub mod proof_service;
pub mod receipt_service;
