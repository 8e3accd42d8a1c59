//! Cart and line item types.

use crate::cart::CartTotals;
use crate::catalog::Product;
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A line in the cart.
///
/// `name` and `price` are snapshots taken when the line was added; the line
/// only weakly references the live product by id. Deleting the product from
/// the catalog leaves the line intact, selling from its snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Referenced product id (lookup only, not ownership).
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Money,
    /// Units ordered. Always positive, and never more than the referenced
    /// product's stock at the time of the last add.
    pub order_qty: i64,
}

impl CartLine {
    /// Total for this line (snapshot price times quantity).
    pub fn line_total(&self) -> Option<Money> {
        self.price.try_multiply(self.order_qty)
    }
}

/// The in-progress order.
///
/// One line per distinct product id; adding the same product again merges
/// into the existing line. The cart is in-memory only; it is never persisted.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a product to the cart, merging with an existing line if present.
    ///
    /// Returns an error if:
    /// - `requested` is not positive or exceeds the product's current stock
    ///   (`InvalidQuantity`)
    /// - merging would push the line past the product's stock
    ///   (`InsufficientStock`, reporting the exact remaining allowance)
    pub fn add_line(&mut self, product: &Product, requested: i64) -> Result<&CartLine, ShopError> {
        if requested <= 0 || requested > product.qty {
            return Err(ShopError::InvalidQuantity(requested));
        }

        let idx = match self.position(product.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                let merged = line
                    .order_qty
                    .checked_add(requested)
                    .ok_or(ShopError::Overflow)?;
                if merged > product.qty {
                    return Err(ShopError::InsufficientStock {
                        product: product.name.clone(),
                        requested,
                        remaining: product.qty - line.order_qty,
                    });
                }
                line.order_qty = merged;
                idx
            }
            None => {
                self.lines.push(CartLine {
                    product_id: product.id,
                    name: product.name.clone(),
                    price: product.price,
                    order_qty: requested,
                });
                self.lines.len() - 1
            }
        };
        Ok(&self.lines[idx])
    }

    /// Remove the entire line for a product.
    ///
    /// Returns `false` (not an error) if no line references the product.
    pub fn remove_line(&mut self, product_id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() < len_before
    }

    /// Empty the cart unconditionally.
    ///
    /// Any "are you sure" confirmation is a presentation-layer concern.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Calculate cart totals over the snapshot prices.
    pub fn totals(&self, currency: Currency) -> Result<CartTotals, ShopError> {
        let total_items = self.lines.iter().map(|l| l.order_qty).sum();
        let mut grand_total = Money::zero(currency);
        for line in &self.lines {
            let line_total = line.line_total().ok_or(ShopError::Overflow)?;
            grand_total = grand_total.try_add(&line_total).ok_or(ShopError::Overflow)?;
        }
        Ok(CartTotals {
            total_items,
            grand_total,
        })
    }

    /// Get the line for a product, if any.
    pub fn find_line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Ordered snapshot of all lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> Product {
        Product::new(
            ProductId::new(1),
            "Basmati Rice (1kg)",
            Money::new(12000, Currency::Bdt),
            50,
        )
    }

    fn oil() -> Product {
        Product::new(
            ProductId::new(3),
            "Cooking Oil (1L)",
            Money::new(18000, Currency::Bdt),
            30,
        )
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        let line = cart.add_line(&rice(), 2).unwrap();
        assert_eq!(line.order_qty, 2);
        assert_eq!(line.price.amount_cents, 12000);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        cart.add_line(&rice(), 10).unwrap();
        cart.add_line(&rice(), 40).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find_line(ProductId::new(1)).unwrap().order_qty, 50);
    }

    #[test]
    fn test_add_invalid_quantity() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_line(&rice(), 0),
            Err(ShopError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add_line(&rice(), -3),
            Err(ShopError::InvalidQuantity(-3))
        ));
        // A single request above stock is invalid, not "insufficient".
        assert!(matches!(
            cart.add_line(&rice(), 51),
            Err(ShopError::InvalidQuantity(51))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_reports_remaining_allowance() {
        let mut cart = Cart::new();
        cart.add_line(&rice(), 10).unwrap();
        let err = cart.add_line(&rice(), 45).unwrap_err();
        match err {
            ShopError::InsufficientStock {
                product,
                requested,
                remaining,
            } => {
                assert_eq!(product, "Basmati Rice (1kg)");
                assert_eq!(requested, 45);
                assert_eq!(remaining, 40);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // The failed add left the line untouched.
        assert_eq!(cart.find_line(ProductId::new(1)).unwrap().order_qty, 10);
    }

    #[test]
    fn test_merge_up_to_stock_succeeds() {
        let mut cart = Cart::new();
        cart.add_line(&rice(), 10).unwrap();
        let line = cart.add_line(&rice(), 40).unwrap();
        assert_eq!(line.order_qty, 50);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.add_line(&rice(), 1).unwrap();
        assert!(cart.remove_line(ProductId::new(1)));
        assert!(cart.is_empty());
        // Absent line is a no-op, not an error.
        assert!(!cart.remove_line(ProductId::new(1)));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_line(&rice(), 1).unwrap();
        cart.add_line(&oil(), 2).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_line(&rice(), 2).unwrap();
        cart.add_line(&oil(), 1).unwrap();

        let totals = cart.totals(Currency::Bdt).unwrap();
        assert_eq!(totals.total_items, 3);
        // 2 x 120.00 + 1 x 180.00 = 420.00
        assert_eq!(totals.grand_total.amount_cents, 42000);
        assert_eq!(totals.grand_total.display(), "420.00 Tk");
    }

    #[test]
    fn test_totals_empty_cart() {
        let cart = Cart::new();
        let totals = cart.totals(Currency::Bdt).unwrap();
        assert_eq!(totals.total_items, 0);
        assert!(totals.grand_total.is_zero());
    }

    #[test]
    fn test_price_is_a_snapshot() {
        let mut cart = Cart::new();
        let mut product = rice();
        cart.add_line(&product, 1).unwrap();

        // A later catalog price change does not touch the cart line.
        product.price = Money::new(15000, Currency::Bdt);
        assert_eq!(cart.find_line(product.id).unwrap().price.amount_cents, 12000);
    }
}
