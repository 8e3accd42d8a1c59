//! Sale records and the sales ledger.

use crate::error::ShopError;
use crate::ids::InvoiceId;
use crate::money::{Currency, Money};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Invoice numbers are 5-digit integers drawn from this half-open range.
const INVOICE_MIN: u32 = 10_000;
const INVOICE_MAX: u32 = 99_999;

/// A line item snapshot inside a sale.
///
/// Decoupled from live catalog state the moment the sale is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLineItem {
    /// Product name at checkout time.
    pub name: String,
    /// Units sold.
    pub qty: i64,
    /// Unit price at add-to-cart time.
    pub price: Money,
}

/// A completed sale.
///
/// Immutable once created; appended to the ledger and never mutated or
/// deleted by this core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    /// Synthetic 5-digit invoice number.
    pub invoice_id: InvoiceId,
    /// Unix timestamp of the sale, in seconds.
    pub timestamp: i64,
    /// Customer name; "Guest Customer" when none was given.
    pub customer_name: String,
    /// Customer phone, if given.
    pub customer_phone: Option<String>,
    /// Grand total over the line item snapshots.
    pub total_amount: Money,
    /// Ordered line item snapshots.
    pub line_items: Vec<SaleLineItem>,
}

impl Sale {
    /// Create a sale stamped with the current time.
    pub fn new(
        invoice_id: InvoiceId,
        customer_name: impl Into<String>,
        customer_phone: Option<String>,
        total_amount: Money,
        line_items: Vec<SaleLineItem>,
    ) -> Self {
        Self {
            invoice_id,
            timestamp: current_timestamp(),
            customer_name: customer_name.into(),
            customer_phone,
            total_amount,
            line_items,
        }
    }

    /// Total units across all line items.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.qty).sum()
    }
}

/// Append-only ordered sequence of sales, persisted as a whole on every
/// append.
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self { sales: Vec::new() }
    }

    /// Rebuild a ledger from a persisted sale list.
    pub fn from_sales(sales: Vec<Sale>) -> Self {
        Self { sales }
    }

    /// Append a completed sale.
    pub fn push(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    /// Ordered snapshot of all sales.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Number of recorded sales.
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Check if no sales have been recorded.
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Check whether an invoice number is already taken.
    pub fn contains_invoice(&self, id: InvoiceId) -> bool {
        self.sales.iter().any(|s| s.invoice_id == id)
    }

    /// Revenue across the whole ledger.
    pub fn total_revenue(&self, currency: Currency) -> Result<Money, ShopError> {
        Money::try_sum(self.sales.iter().map(|s| &s.total_amount), currency)
            .ok_or(ShopError::Overflow)
    }

    /// Draw a 5-digit invoice number not already present in the ledger.
    ///
    /// The id space dwarfs any plausible ledger for a single shop, so the
    /// rejection loop terminates almost immediately.
    pub fn draw_invoice_id(&self, rng: &mut impl Rng) -> InvoiceId {
        loop {
            let id = InvoiceId::new(rng.gen_range(INVOICE_MIN..INVOICE_MAX));
            if !self.contains_invoice(id) {
                return id;
            }
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(invoice: u32, cents: i64) -> Sale {
        Sale::new(
            InvoiceId::new(invoice),
            "Guest Customer",
            None,
            Money::new(cents, Currency::Bdt),
            vec![SaleLineItem {
                name: "Refined Sugar (500g)".to_string(),
                qty: 1,
                price: Money::new(cents, Currency::Bdt),
            }],
        )
    }

    #[test]
    fn test_ledger_append() {
        let mut ledger = SalesLedger::new();
        ledger.push(sale(10234, 5500));
        ledger.push(sale(57761, 11000));
        assert_eq!(ledger.len(), 2);
        assert!(ledger.contains_invoice(InvoiceId::new(10234)));
        assert!(!ledger.contains_invoice(InvoiceId::new(10235)));
    }

    #[test]
    fn test_total_revenue() {
        let mut ledger = SalesLedger::new();
        ledger.push(sale(10234, 5500));
        ledger.push(sale(57761, 11000));
        let revenue = ledger.total_revenue(Currency::Bdt).unwrap();
        assert_eq!(revenue.amount_cents, 16500);
    }

    #[test]
    fn test_draw_invoice_id_in_range() {
        let ledger = SalesLedger::new();
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let id = ledger.draw_invoice_id(&mut rng).value();
            assert!((INVOICE_MIN..INVOICE_MAX).contains(&id));
        }
    }

    #[test]
    fn test_draw_invoice_id_skips_taken() {
        let mut ledger = SalesLedger::new();
        // Occupy a slice of the id space; draws must avoid all of it.
        for invoice in INVOICE_MIN..INVOICE_MIN + 500 {
            ledger.push(sale(invoice, 100));
        }
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let id = ledger.draw_invoice_id(&mut rng);
            assert!(!ledger.contains_invoice(id));
        }
    }

    #[test]
    fn test_sale_item_count() {
        let mut s = sale(10234, 5500);
        s.line_items.push(SaleLineItem {
            name: "Cooking Oil (1L)".to_string(),
            qty: 2,
            price: Money::new(18000, Currency::Bdt),
        });
        assert_eq!(s.item_count(), 3);
    }
}
