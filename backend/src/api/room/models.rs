//! Response payloads for the room endpoints.

use crate::database::models::{Invoice, RoomWithInvoices};
use serde::Serialize;

/// Response carrying one room together with its invoices
#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub message: String,
    pub room: RoomWithInvoices,
}

/// Response carrying every room, each with its invoices
#[derive(Debug, Serialize)]
pub struct RoomListResponse {
    pub message: String,
    pub rooms: Vec<RoomWithInvoices>,
}

/// Response carrying the invoices filtered by room
#[derive(Debug, Serialize)]
pub struct RoomInvoicesResponse {
    pub message: String,
    pub invoices: Vec<Invoice>,
}
