//! Payment-proof attachment business logic.
//!
//! Binds an uploaded slip file to an invoice and transitions its status to
//! `payment`. The invoice is resolved before anything touches the disk so a
//! miss leaves no trace.

use crate::database::models::Invoice;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::utils::generate_random_string::generate_random_string;
use chrono::Utc;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

/// Service attaching payment-proof files to invoices.
pub struct ProofService<'a> {
    pool: &'a SqlitePool,
    upload_dir: PathBuf,
}

impl<'a> ProofService<'a> {
    pub fn new(pool: &'a SqlitePool, upload_dir: impl Into<PathBuf>) -> Self {
        ProofService {
            pool,
            upload_dir: upload_dir.into(),
        }
    }

    /// Stores the uploaded slip and binds it to the invoice.
    ///
    /// Returns the updated invoice together with the stored filename.
    pub async fn attach_slip(
        &self,
        invoice_id: i64,
        original_name: Option<&str>,
        data: &[u8],
    ) -> ServiceResult<(Invoice, String)> {
        let repo = InvoiceRepository::new(self.pool);

        if repo.get_invoice_by_id(invoice_id).await?.is_none() {
            return Err(ServiceError::not_found("Invoice"));
        }

        let filename = self.store_slip(original_name, data).await?;

        let invoice = repo
            .set_payment_proof(invoice_id, &filename)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice"))?;

        tracing::info!(invoice_id, slip = %filename, "payment proof attached");
        Ok((invoice, filename))
    }

    /// Writes the slip bytes under the upload directory.
    ///
    /// The stored name is `{unix_millis}{random}_slip{ext}`; the timestamp
    /// plus random suffix keeps concurrent uploads from colliding.
    async fn store_slip(&self, original_name: Option<&str>, data: &[u8]) -> ServiceResult<String> {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_else(|| ".jpeg".to_string());

        let filename = format!(
            "{}{}_slip{}",
            Utc::now().timestamp_millis(),
            generate_random_string(8),
            extension
        );

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| ServiceError::internal(format!("Upload directory unavailable: {}", e)))?;

        tokio::fs::write(self.upload_dir.join(&filename), data)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to store payment slip: {}", e)))?;

        Ok(filename)
    }
}
