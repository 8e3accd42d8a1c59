//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Owned exclusively by the [`Catalog`](crate::catalog::Catalog): created by
/// upsert, mutated in place by update and by checkout's stock decrement,
/// removed by delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique identifier, stable for the life of the catalog.
    pub id: ProductId,
    /// Display name; unique among products ignoring case.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Units on hand. Never negative.
    pub qty: i64,
}

impl Product {
    /// Create a new product.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, qty: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            qty,
        }
    }

    /// Check if any stock is on hand.
    pub fn is_in_stock(&self) -> bool {
        self.qty > 0
    }

    /// Check if a requested quantity can be fulfilled from current stock.
    pub fn can_fulfill(&self, requested: i64) -> bool {
        requested > 0 && requested <= self.qty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_creation() {
        let product = Product::new(
            ProductId::new(1),
            "Basmati Rice (1kg)",
            Money::new(12000, Currency::Bdt),
            50,
        );
        assert_eq!(product.name, "Basmati Rice (1kg)");
        assert!(product.is_in_stock());
    }

    #[test]
    fn test_can_fulfill() {
        let product = Product::new(
            ProductId::new(1),
            "Cooking Oil (1L)",
            Money::new(18000, Currency::Bdt),
            30,
        );
        assert!(product.can_fulfill(30));
        assert!(!product.can_fulfill(31));
        assert!(!product.can_fulfill(0));
    }

    #[test]
    fn test_out_of_stock() {
        let product = Product::new(
            ProductId::new(2),
            "Fresh Milk (1L)",
            Money::new(7000, Currency::Bdt),
            0,
        );
        assert!(!product.is_in_stock());
        assert!(!product.can_fulfill(1));
    }
}
