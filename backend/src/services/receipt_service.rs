//! Receipt rendering for invoices.
//!
//! Builds a fixed-layout PDF financial document from an invoice and its
//! owning room, computing the grand total on the fly. Rendering has no side
//! effects beyond returning the document bytes.

use crate::config::Config;
use crate::database::models::{Invoice, Room};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::repositories::room_repository::RoomRepository;
use chrono::Datelike;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use sqlx::SqlitePool;

// US Letter, 50pt margins.
const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 50.0;
const RIGHT_EDGE: f64 = PAGE_WIDTH - MARGIN;

/// Service rendering invoice receipts.
pub struct ReceiptService<'a> {
    pool: &'a SqlitePool,
    payer_name: String,
    payer_email: String,
}

impl<'a> ReceiptService<'a> {
    pub fn new(pool: &'a SqlitePool, config: &Config) -> Self {
        ReceiptService {
            pool,
            payer_name: config.receipt_payer_name.clone(),
            payer_email: config.receipt_payer_email.clone(),
        }
    }

    /// Renders the receipt for an invoice as PDF bytes.
    ///
    /// The raw path segment is checked for identifier shape before any
    /// lookup happens.
    pub async fn render(&self, invoice_id_raw: &str) -> ServiceResult<Vec<u8>> {
        let invoice_id = invoice_id_raw
            .parse::<i64>()
            .map_err(|_| ServiceError::validation("Invalid invoice id."))?;

        let invoice = InvoiceRepository::new(self.pool)
            .get_invoice_by_id(invoice_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invoice"))?;

        let room = RoomRepository::new(self.pool)
            .get_room_by_id(invoice.room_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))?;

        self.compose(&invoice, &room)
    }

    fn compose(&self, invoice: &Invoice, room: &Room) -> ServiceResult<Vec<u8>> {
        let mut page = PageComposer::new();

        page.text(25.0, "Receipt", Align::Center);
        page.move_down();

        let date = invoice.invoice_date;
        let billing_date = format!("{}/{}/{}", date.month(), date.day(), date.year());
        page.text(15.0, &format!("Billing Date: {}", billing_date), Align::Right);
        page.text(15.0, &format!("Name : {} ", self.payer_name), Align::Right);
        page.text(15.0, &format!("Email : {}", self.payer_email), Align::Right);

        page.move_down();
        page.divider();
        page.move_down();

        page.text_underlined(15.0, "Room Details", Align::Left);
        page.text(15.0, &format!("Room Number: {}", room.room_number), Align::Left);
        page.text(15.0, &format!("Location: {}", room.location), Align::Left);
        page.move_down();

        page.text_underlined(15.0, "Invoice Details", Align::Left);
        page.text(15.0, &format!("Room : ${:.2} baht ", invoice.room_fee), Align::Left);
        page.text(15.0, &format!("Water: ${:.2} baht ", invoice.water_fee), Align::Left);
        page.text(
            15.0,
            &format!("Electricity: ${:.2}", invoice.electricity_fee),
            Align::Left,
        );
        page.text(
            15.0,
            &format!("Other Expenses: ${:.2}", invoice.other_expenses),
            Align::Left,
        );
        page.text(15.0, &format!("Status: {}", invoice.status), Align::Left);
        page.move_down();

        page.fill_color(0, 0, 1);
        page.text(20.0, &format!("Total: {:.2} baht ", invoice.total()), Align::Right);
        page.fill_color(0, 0, 0);
        page.move_down();

        page.text(15.0, "Thank you for your payment!", Align::Right);

        build_document(page.into_operations())
            .map_err(|e| ServiceError::internal(format!("Receipt rendering failed: {}", e)))
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Accumulates content-stream operations while tracking a vertical cursor
/// from the top margin downwards.
struct PageComposer {
    operations: Vec<Operation>,
    cursor: f64,
}

impl PageComposer {
    fn new() -> Self {
        PageComposer {
            operations: Vec::new(),
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    fn text(&mut self, size: f64, text: &str, align: Align) {
        self.place_text(size, text, align, false);
    }

    fn text_underlined(&mut self, size: f64, text: &str, align: Align) {
        self.place_text(size, text, align, true);
    }

    fn place_text(&mut self, size: f64, text: &str, align: Align, underline: bool) {
        let width = text_width(text, size);
        let x = match align {
            Align::Left => MARGIN,
            Align::Center => (PAGE_WIDTH - width) / 2.0,
            Align::Right => RIGHT_EDGE - width,
        };
        let baseline = self.cursor - size;

        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), (size as i64).into()],
        ));
        self.operations.push(Operation::new(
            "Td",
            vec![(x as i64).into(), (baseline as i64).into()],
        ));
        self.operations
            .push(Operation::new("Tj", vec![Object::string_literal(text)]));
        self.operations.push(Operation::new("ET", vec![]));

        if underline {
            self.line(x, baseline - 2.0, x + width, baseline - 2.0);
        }

        self.cursor = baseline - size * 0.25;
    }

    /// Horizontal rule across the content area.
    fn divider(&mut self) {
        self.line(MARGIN, self.cursor, 550.0, self.cursor);
        self.cursor -= 10.0;
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.operations.push(Operation::new(
            "m",
            vec![(x1 as i64).into(), (y1 as i64).into()],
        ));
        self.operations.push(Operation::new(
            "l",
            vec![(x2 as i64).into(), (y2 as i64).into()],
        ));
        self.operations.push(Operation::new("S", vec![]));
    }

    fn fill_color(&mut self, r: i64, g: i64, b: i64) {
        self.operations
            .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    }

    fn move_down(&mut self) {
        self.cursor -= 15.0;
    }
}

/// Advance widths for the standard Helvetica font, characters 32..=126,
/// in 1/1000 em units.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

fn text_width(text: &str, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                u32::from(HELVETICA_WIDTHS[code - 32])
            } else {
                556
            }
        })
        .sum();
    f64::from(units) * size / 1000.0
}

/// Assembles a single-page document around the given content stream.
fn build_document(operations: Vec<Operation>) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), (PAGE_WIDTH as i64).into(), (PAGE_HEIGHT as i64).into()],
        "Resources" => resources_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreateInvoice;
    use crate::database::test_support::{memory_pool, seed_room};
    use crate::services::invoice_service::normalize_invoice_date;

    fn config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "test-secret".to_string(),
            jwt_expires_in_seconds: 86400,
            server_port: 8080,
            upload_dir: "uploads".to_string(),
            max_upload_bytes: 25 * 1024 * 1024,
            receipt_payer_name: "Suphanat Bamrungna".to_string(),
            receipt_payer_email: "suphanat@gmail.com".to_string(),
        }
    }

    async fn seed_invoice(pool: &sqlx::SqlitePool, room_id: i64, fees: [f64; 4]) -> Invoice {
        InvoiceRepository::new(pool)
            .create_invoice(CreateInvoice {
                room_id,
                invoice_date: normalize_invoice_date("2024-01-01").unwrap(),
                room_fee: fees[0],
                water_fee: fees[1],
                electricity_fee: fees[2],
                other_expenses: fees[3],
            })
            .await
            .unwrap()
    }

    fn extracted_text(bytes: &[u8]) -> String {
        let doc = Document::load_mem(bytes).unwrap();
        doc.extract_text(&[1]).unwrap()
    }

    #[tokio::test]
    async fn receipt_total_is_the_exact_fee_sum() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let invoice = seed_invoice(&pool, room.id, [1000.0, 50.0, 75.0, 0.0]).await;
        let service = ReceiptService::new(&pool, &config());

        let bytes = service.render(&invoice.id.to_string()).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let text = extracted_text(&bytes);
        assert!(text.contains("Receipt"));
        assert!(text.contains("Billing Date: 1/1/2024"));
        assert!(text.contains("Name : Suphanat Bamrungna"));
        assert!(text.contains("Room Number: 101"));
        assert!(text.contains("Location: Building A"));
        assert!(text.contains("Room : $1000.00 baht"));
        assert!(text.contains("Water: $50.00 baht"));
        assert!(text.contains("Electricity: $75.00"));
        assert!(text.contains("Other Expenses: $0.00"));
        assert!(text.contains("Status: unpaid"));
        assert!(text.contains("Total: 1125.00 baht"));
        assert!(text.contains("Thank you for your payment!"));
    }

    #[tokio::test]
    async fn all_zero_fees_total_to_zero() {
        let pool = memory_pool().await;
        let room = seed_room(&pool, "101", "Building A").await;
        let invoice = seed_invoice(&pool, room.id, [0.0, 0.0, 0.0, 0.0]).await;
        let service = ReceiptService::new(&pool, &config());

        let bytes = service.render(&invoice.id.to_string()).await.unwrap();
        assert!(extracted_text(&bytes).contains("Total: 0.00 baht"));
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_validation_error() {
        let pool = memory_pool().await;
        let service = ReceiptService::new(&pool, &config());

        let err = service.render("abc").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn unknown_invoice_is_not_found() {
        let pool = memory_pool().await;
        let service = ReceiptService::new(&pool, &config());

        let err = service.render("999").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity } if entity == "Invoice"));
    }

    #[tokio::test]
    async fn invoice_with_a_dangling_room_is_not_found() {
        let pool = memory_pool().await;
        let invoice = seed_invoice(&pool, 999, [1.0, 1.0, 1.0, 1.0]).await;
        let service = ReceiptService::new(&pool, &config());

        let err = service.render(&invoice.id.to_string()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity } if entity == "Room"));
    }

    #[test]
    fn width_table_orders_alignment_sensibly() {
        // "iii" is much narrower than "WWW" in a proportional face.
        assert!(text_width("iii", 15.0) < text_width("WWW", 15.0));
        assert_eq!(text_width("", 15.0), 0.0);
    }
}
