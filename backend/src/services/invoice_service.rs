//! Invoice lifecycle business logic.
//!
//! Creates, reads, updates, and deletes invoices, enforcing the
//! required-field and fee rules.

use crate::api::common::validation_errors_to_message;
use crate::database::models::{
    CreateInvoice, CreateInvoiceRequest, Invoice, RoomWithInvoices, UpdateInvoiceRequest,
};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::repositories::room_repository::RoomRepository;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;
use validator::Validate;

/// Service for invoice lifecycle operations.
pub struct InvoiceService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> InvoiceService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        InvoiceService { pool }
    }

    /// Creates an invoice with status `unpaid`.
    ///
    /// All six inputs must be present; fee values must not be negative.
    pub async fn create_invoice(&self, request: CreateInvoiceRequest) -> ServiceResult<Invoice> {
        if request.room_fee.is_none()
            || request.water_fee.is_none()
            || request.electricity_fee.is_none()
            || request.other_expenses.is_none()
            || request.room_id.is_none()
            || request.invoice_date.is_none()
        {
            return Err(ServiceError::validation("All fields are required."));
        }

        if let Err(errors) = request.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                errors,
            )));
        }

        let invoice_date = normalize_invoice_date(request.invoice_date.as_deref().unwrap_or(""))?;

        let invoice = InvoiceRepository::new(self.pool)
            .create_invoice(CreateInvoice {
                room_id: request.room_id.unwrap_or_default(),
                invoice_date,
                room_fee: request.room_fee.unwrap_or_default(),
                water_fee: request.water_fee.unwrap_or_default(),
                electricity_fee: request.electricity_fee.unwrap_or_default(),
                other_expenses: request.other_expenses.unwrap_or_default(),
            })
            .await?;

        tracing::info!(invoice_id = invoice.id, room_id = invoice.room_id, "invoice created");
        Ok(invoice)
    }

    /// Returns a room together with its invoices.
    pub async fn get_room_with_invoices(&self, room_id: i64) -> ServiceResult<RoomWithInvoices> {
        let room = RoomRepository::new(self.pool)
            .get_room_by_id(room_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))?;

        let invoices = InvoiceRepository::new(self.pool)
            .list_invoices_by_room_id(room_id)
            .await?;

        Ok(RoomWithInvoices { room, invoices })
    }

    /// Returns every room, each with its invoices.
    pub async fn list_rooms_with_invoices(&self) -> ServiceResult<Vec<RoomWithInvoices>> {
        let rooms = RoomRepository::new(self.pool).list_rooms().await?;
        let invoice_repo = InvoiceRepository::new(self.pool);

        let mut result = Vec::with_capacity(rooms.len());
        for room in rooms {
            let invoices = invoice_repo.list_invoices_by_room_id(room.id).await?;
            result.push(RoomWithInvoices { room, invoices });
        }

        Ok(result)
    }

    /// Returns the invoices filtered by room foreign key.
    ///
    /// An unknown room yields an empty list rather than an error.
    pub async fn list_invoices_by_room(&self, room_id: i64) -> ServiceResult<Vec<Invoice>> {
        let invoices = InvoiceRepository::new(self.pool)
            .list_invoices_by_room_id(room_id)
            .await?;

        Ok(invoices)
    }

    /// Overwrites the fee fields and the date of an existing invoice.
    ///
    /// The payment state is untouched by this path.
    pub async fn update_invoice(
        &self,
        invoice_id: i64,
        request: UpdateInvoiceRequest,
    ) -> ServiceResult<Invoice> {
        if request.room_fee.is_none()
            || request.water_fee.is_none()
            || request.electricity_fee.is_none()
            || request.other_expenses.is_none()
            || request.invoice_date.is_none()
        {
            return Err(ServiceError::validation("All fields are required."));
        }

        if let Err(errors) = request.validate() {
            return Err(ServiceError::validation(validation_errors_to_message(
                errors,
            )));
        }

        let invoice_date = normalize_invoice_date(request.invoice_date.as_deref().unwrap_or(""))?;

        let invoice = InvoiceRepository::new(self.pool)
            .update_invoice(
                invoice_id,
                request.room_fee.unwrap_or_default(),
                request.water_fee.unwrap_or_default(),
                request.electricity_fee.unwrap_or_default(),
                request.other_expenses.unwrap_or_default(),
                invoice_date,
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice"))?;

        tracing::info!(invoice_id = invoice.id, "invoice updated");
        Ok(invoice)
    }

    /// Deletes an invoice and returns the deleted record.
    pub async fn delete_invoice(&self, invoice_id: i64) -> ServiceResult<Invoice> {
        let invoice = InvoiceRepository::new(self.pool)
            .delete_invoice(invoice_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice"))?;

        tracing::info!(invoice_id = invoice.id, "invoice deleted");
        Ok(invoice)
    }
}

/// Normalizes an invoice date to a canonical UTC timestamp.
///
/// Accepts RFC 3339 or a plain `YYYY-MM-DD` calendar date (taken as UTC
/// midnight).
pub fn normalize_invoice_date(raw: &str) -> ServiceResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    Err(ServiceError::validation("Invalid invoice date."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::InvoiceStatus;
    use crate::database::test_support::{memory_pool, seed_room};

    fn create_request(room_id: i64) -> CreateInvoiceRequest {
        CreateInvoiceRequest {
            room_fee: Some(1000.0),
            water_fee: Some(50.0),
            electricity_fee: Some(75.0),
            other_expenses: Some(0.0),
            room_id: Some(room_id),
            invoice_date: Some("2024-01-01".to_string()),
        }
    }

    fn update_request() -> UpdateInvoiceRequest {
        UpdateInvoiceRequest {
            room_fee: Some(1200.0),
            water_fee: Some(60.0),
            electricity_fee: Some(80.0),
            other_expenses: Some(10.0),
            invoice_date: Some("2024-02-01".to_string()),
        }
    }

    #[tokio::test]
    async fn create_starts_unpaid_with_no_proof() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let service = InvoiceService::new(&pool);

        let invoice = service.create_invoice(create_request(room.id)).await.unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Unpaid);
        assert_eq!(invoice.payment_proof, None);
        assert_eq!(invoice.room_id, room.id);
        assert_eq!(invoice.total(), 1125.0);
    }

    #[tokio::test]
    async fn create_rejects_a_missing_field() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let service = InvoiceService::new(&pool);

        let request = CreateInvoiceRequest {
            water_fee: None,
            ..create_request(room.id)
        };

        let err = service.create_invoice(request).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
        assert!(service
            .list_invoices_by_room(room.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn create_rejects_negative_fees() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let service = InvoiceService::new(&pool);

        let request = CreateInvoiceRequest {
            electricity_fee: Some(-1.0),
            ..create_request(room.id)
        };

        let err = service.create_invoice(request).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[test]
    fn date_only_input_is_normalized_to_utc_midnight() {
        let date = normalize_invoice_date("2024-01-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-01-01T00:00:00+00:00");

        let stamped = normalize_invoice_date("2024-01-01T08:30:00+07:00").unwrap();
        assert_eq!(stamped.to_rfc3339(), "2024-01-01T01:30:00+00:00");

        assert!(normalize_invoice_date("not-a-date").is_err());
    }

    #[tokio::test]
    async fn update_overwrites_fees_but_not_status() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let service = InvoiceService::new(&pool);

        let invoice = service.create_invoice(create_request(room.id)).await.unwrap();

        sqlx::query("UPDATE invoices SET status = 'payment' WHERE id = ?")
            .bind(invoice.id)
            .execute(&pool)
            .await
            .unwrap();

        let updated = service
            .update_invoice(invoice.id, update_request())
            .await
            .unwrap();

        assert_eq!(updated.room_fee, 1200.0);
        assert_eq!(updated.status, InvoiceStatus::Payment);
        assert_eq!(updated.invoice_date.to_rfc3339(), "2024-02-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn update_of_unknown_invoice_is_not_found() {
        let pool = memory_pool().await;
        let service = InvoiceService::new(&pool);

        let err = service.update_invoice(999, update_request()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_returns_the_record_and_removes_it() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let service = InvoiceService::new(&pool);

        let invoice = service.create_invoice(create_request(room.id)).await.unwrap();

        let deleted = service.delete_invoice(invoice.id).await.unwrap();
        assert_eq!(deleted.id, invoice.id);

        let err = service.delete_invoice(invoice.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn room_lookup_includes_its_invoices_in_insertion_order() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let other = seed_room(&pool, "202", "Building B").await;
        let service = InvoiceService::new(&pool);

        let first = service.create_invoice(create_request(room.id)).await.unwrap();
        let second = service.create_invoice(create_request(room.id)).await.unwrap();
        service.create_invoice(create_request(other.id)).await.unwrap();

        let found = service.get_room_with_invoices(room.id).await.unwrap();
        assert_eq!(found.room.id, room.id);
        assert_eq!(
            found.invoices.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        let err = service.get_room_with_invoices(999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn listing_rooms_attaches_invoices_per_room() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let empty = seed_room(&pool, "202", "Building B").await;
        let service = InvoiceService::new(&pool);

        service.create_invoice(create_request(room.id)).await.unwrap();

        let rooms = service.list_rooms_with_invoices().await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room.id, room.id);
        assert_eq!(rooms[0].invoices.len(), 1);
        assert_eq!(rooms[1].room.id, empty.id);
        assert!(rooms[1].invoices.is_empty());
    }

    #[tokio::test]
    async fn unknown_room_filter_yields_an_empty_list() {
        let pool = memory_pool().await;
        let service = InvoiceService::new(&pool);

        assert!(service.list_invoices_by_room(999).await.unwrap().is_empty());
    }
}
