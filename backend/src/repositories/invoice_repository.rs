//! Database repository for invoice records.
//!
//! Provides CRUD operations for invoices plus the payment-proof transition.

use crate::database::models::{CreateInvoice, Invoice, InvoiceStatus};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Repository for invoice database operations.
///
/// Handles all persistence operations for the Invoice entity, maintaining
/// the foreign-key relationship with rooms.
pub struct InvoiceRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> InvoiceRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new invoice with status `unpaid` and no payment proof.
    ///
    /// # Arguments
    /// * `invoice` - CreateInvoice DTO containing the fee fields
    ///
    /// # Returns
    /// The newly created Invoice with all fields populated
    pub async fn create_invoice(&self, invoice: CreateInvoice) -> Result<Invoice> {
        let created = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (room_id, invoice_date, room_fee, water_fee, electricity_fee, other_expenses, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(invoice.room_id)
        .bind(invoice.invoice_date)
        .bind(invoice.room_fee)
        .bind(invoice.water_fee)
        .bind(invoice.electricity_fee)
        .bind(invoice.other_expenses)
        .bind(InvoiceStatus::Unpaid)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Retrieves an invoice by its unique identifier.
    pub async fn get_invoice_by_id(&self, id: i64) -> Result<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(invoice)
    }

    /// Retrieves the invoices belonging to a room, in insertion order.
    pub async fn list_invoices_by_room_id(&self, room_id: i64) -> Result<Vec<Invoice>> {
        let invoices =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE room_id = ? ORDER BY id")
                .bind(room_id)
                .fetch_all(self.pool)
                .await?;

        Ok(invoices)
    }

    /// Overwrites the four fee fields and the invoice date.
    ///
    /// Status and payment proof are left untouched.
    ///
    /// # Returns
    /// The updated Invoice, or `None` if the id does not exist
    pub async fn update_invoice(
        &self,
        id: i64,
        room_fee: f64,
        water_fee: f64,
        electricity_fee: f64,
        other_expenses: f64,
        invoice_date: DateTime<Utc>,
    ) -> Result<Option<Invoice>> {
        let updated = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET room_fee = ?, water_fee = ?, electricity_fee = ?, other_expenses = ?, invoice_date = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(room_fee)
        .bind(water_fee)
        .bind(electricity_fee)
        .bind(other_expenses)
        .bind(invoice_date)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(updated)
    }

    /// Deletes an invoice and returns the deleted record.
    pub async fn delete_invoice(&self, id: i64) -> Result<Option<Invoice>> {
        let deleted = sqlx::query_as::<_, Invoice>("DELETE FROM invoices WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(deleted)
    }

    /// Binds a payment-proof file reference and moves the invoice to `payment`.
    pub async fn set_payment_proof(&self, id: i64, filename: &str) -> Result<Option<Invoice>> {
        let updated = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET status = ?, payment_proof = ? WHERE id = ? RETURNING *",
        )
        .bind(InvoiceStatus::Payment)
        .bind(filename)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(updated)
    }
}
