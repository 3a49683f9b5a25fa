//! Response payloads for the invoice endpoints.

use crate::database::models::Invoice;
use serde::Serialize;

/// Response carrying a single invoice plus a status message
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub message: String,
    pub invoice: Invoice,
}

/// Response for a deletion, echoing the removed record
#[derive(Debug, Serialize)]
pub struct DeleteInvoiceResponse {
    pub message: String,
    pub deleted: Invoice,
}

/// Response after binding a payment proof
#[derive(Debug, Serialize)]
pub struct AttachProofResponse {
    pub status: bool,
    pub image: String,
}
