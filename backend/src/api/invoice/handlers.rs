//! Handler functions for invoice-related API endpoints.
//!
//! These functions parse incoming requests for the invoice lifecycle, the
//! receipt document, and the payment-proof upload, and delegate to the
//! corresponding services.

use crate::api::common::{error_message, service_error_to_http};
use crate::api::invoice::models::{AttachProofResponse, DeleteInvoiceResponse, InvoiceResponse};
use crate::config::Config;
use crate::database::models::{CreateInvoiceRequest, UpdateInvoiceRequest};
use crate::services::invoice_service::InvoiceService;
use crate::services::proof_service::ProofService;
use crate::services::receipt_service::ReceiptService;
use axum::{
    extract::{Extension, Json, Multipart, Path},
    http::{StatusCode, header},
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Multipart field carrying the payment slip image.
const SLIP_FIELD: &str = "payment_slip";

/// Handle invoice creation
#[axum::debug_handler]
pub async fn create_invoice(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<ResponseJson<InvoiceResponse>, (StatusCode, String)> {
    match InvoiceService::new(&pool).create_invoice(payload).await {
        Ok(invoice) => Ok(ResponseJson(InvoiceResponse {
            message: "Bill was created successfully!".to_string(),
            invoice,
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle invoice update
#[axum::debug_handler]
pub async fn update_invoice(
    Extension(pool): Extension<SqlitePool>,
    Path(invoice_id): Path<i64>,
    Json(payload): Json<UpdateInvoiceRequest>,
) -> Result<ResponseJson<InvoiceResponse>, (StatusCode, String)> {
    match InvoiceService::new(&pool)
        .update_invoice(invoice_id, payload)
        .await
    {
        Ok(invoice) => Ok(ResponseJson(InvoiceResponse {
            message: "Bill was updated successfully!".to_string(),
            invoice,
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle invoice deletion
#[axum::debug_handler]
pub async fn delete_invoice(
    Extension(pool): Extension<SqlitePool>,
    Path(invoice_id): Path<i64>,
) -> Result<ResponseJson<DeleteInvoiceResponse>, (StatusCode, String)> {
    match InvoiceService::new(&pool).delete_invoice(invoice_id).await {
        Ok(deleted) => Ok(ResponseJson(DeleteInvoiceResponse {
            message: "Bill was deleted successfully!".to_string(),
            deleted,
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle receipt rendering; the response is a PDF attachment.
#[axum::debug_handler]
pub async fn get_receipt(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Path(invoice_id): Path<String>,
) -> Result<([(header::HeaderName, String); 2], Vec<u8>), (StatusCode, String)> {
    match ReceiptService::new(&pool, &config).render(&invoice_id).await {
        Ok(bytes) => Ok((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=receipt_{}.pdf", invoice_id),
                ),
            ],
            bytes,
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle payment-proof upload (multipart, single image field).
#[axum::debug_handler]
pub async fn upload_payment_proof(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Path(invoice_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<ResponseJson<AttachProofResponse>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_message(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some(SLIP_FIELD) {
            continue;
        }

        if !field
            .content_type()
            .is_some_and(|mime| mime.starts_with("image"))
        {
            return Err(error_message(
                StatusCode::BAD_REQUEST,
                "Please upload only images.",
            ));
        }

        let original_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| error_message(StatusCode::BAD_REQUEST, e.to_string()))?;

        return match ProofService::new(&pool, &config.upload_dir)
            .attach_slip(invoice_id, original_name.as_deref(), &data)
            .await
        {
            Ok((_, filename)) => Ok(ResponseJson(AttachProofResponse {
                status: true,
                image: filename,
            })),
            Err(error) => Err(service_error_to_http(error)),
        };
    }

    Err(error_message(
        StatusCode::BAD_REQUEST,
        "Payment slip file is required.",
    ))
}
