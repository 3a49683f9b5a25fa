//! Handler functions for room-related API endpoints.

use crate::api::common::service_error_to_http;
use crate::api::room::models::{RoomInvoicesResponse, RoomListResponse, RoomResponse};
use crate::services::invoice_service::InvoiceService;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Handle lookup of one room together with its invoices
#[axum::debug_handler]
pub async fn get_room_invoices(
    Extension(pool): Extension<SqlitePool>,
    Path(room_id): Path<i64>,
) -> Result<ResponseJson<RoomResponse>, (StatusCode, String)> {
    match InvoiceService::new(&pool).get_room_with_invoices(room_id).await {
        Ok(room) => Ok(ResponseJson(RoomResponse {
            message: "Bill was found successfully!".to_string(),
            room,
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle listing of every room with its invoices
#[axum::debug_handler]
pub async fn list_rooms(
    Extension(pool): Extension<SqlitePool>,
) -> Result<ResponseJson<RoomListResponse>, (StatusCode, String)> {
    match InvoiceService::new(&pool).list_rooms_with_invoices().await {
        Ok(rooms) => Ok(ResponseJson(RoomListResponse {
            message: "Room was found successfully!".to_string(),
            rooms,
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle listing of the invoices belonging to one room
#[axum::debug_handler]
pub async fn get_invoices_by_room(
    Extension(pool): Extension<SqlitePool>,
    Path(room_id): Path<i64>,
) -> Result<ResponseJson<RoomInvoicesResponse>, (StatusCode, String)> {
    match InvoiceService::new(&pool).list_invoices_by_room(room_id).await {
        Ok(invoices) => Ok(ResponseJson(RoomInvoicesResponse {
            message: "Room was found successfully!".to_string(),
            invoices,
        })),
        Err(error) => Err(service_error_to_http(error)),
    }
}
