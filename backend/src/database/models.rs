//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully-resolved user row ready for insertion.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Unpaid,
    Payment,
    Paid,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Unpaid => write!(f, "unpaid"),
            InvoiceStatus::Payment => write!(f, "payment"),
            InvoiceStatus::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(InvoiceStatus::Unpaid),
            "payment" => Ok(InvoiceStatus::Payment),
            "paid" => Ok(InvoiceStatus::Paid),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: i64,
    pub room_id: i64,
    pub invoice_date: DateTime<Utc>,
    pub room_fee: f64,
    pub water_fee: f64,
    pub electricity_fee: f64,
    pub other_expenses: f64,
    pub status: InvoiceStatus,
    pub payment_proof: Option<String>,
}

impl Invoice {
    /// Grand total of the four fee fields. Computed on demand, never stored.
    pub fn total(&self) -> f64 {
        self.room_fee + self.water_fee + self.electricity_fee + self.other_expenses
    }
}

/// Fully-resolved invoice row ready for insertion.
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub room_id: i64,
    pub invoice_date: DateTime<Utc>,
    pub room_fee: f64,
    pub water_fee: f64,
    pub electricity_fee: f64,
    pub other_expenses: f64,
}

/// Invoice creation payload. Fields are optional so that a missing key can be
/// reported as a 400 by the service rather than a deserialization rejection;
/// present values are range-checked.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(range(min = 0.0, message = "room_fee must not be negative"))]
    pub room_fee: Option<f64>,

    #[validate(range(min = 0.0, message = "water_fee must not be negative"))]
    pub water_fee: Option<f64>,

    #[validate(range(min = 0.0, message = "electricity_fee must not be negative"))]
    pub electricity_fee: Option<f64>,

    #[validate(range(min = 0.0, message = "other_expenses must not be negative"))]
    pub other_expenses: Option<f64>,

    #[validate(range(min = 1, message = "room_id must be a valid room identifier"))]
    pub room_id: Option<i64>,

    pub invoice_date: Option<String>,
}

/// Invoice update payload. The owning room and the payment state are not
/// updatable through this path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
    #[validate(range(min = 0.0, message = "room_fee must not be negative"))]
    pub room_fee: Option<f64>,

    #[validate(range(min = 0.0, message = "water_fee must not be negative"))]
    pub water_fee: Option<f64>,

    #[validate(range(min = 0.0, message = "electricity_fee must not be negative"))]
    pub electricity_fee: Option<f64>,

    #[validate(range(min = 0.0, message = "other_expenses must not be negative"))]
    pub other_expenses: Option<f64>,

    pub invoice_date: Option<String>,
}

// View models for API responses (with joined data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomWithInvoices {
    #[serde(flatten)]
    pub room: Room,
    pub invoices: Vec<Invoice>,
}
