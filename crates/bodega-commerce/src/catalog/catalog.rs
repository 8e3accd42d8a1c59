//! Catalog state and operations.

use crate::catalog::Product;
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use std::collections::HashMap;

/// The product catalog.
///
/// Owns the ordered product list. Name uniqueness is case-insensitive,
/// enforced through a normalized secondary index (lowercased name to id)
/// maintained alongside the primary list. Ids come from a high-water mark
/// that only ever increases, so an id is never reused after assignment
/// within a session even when the highest-id product is deleted.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_name: HashMap<String, ProductId>,
    next_id: u32,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            by_name: HashMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild a catalog from a persisted product list.
    ///
    /// The next id resumes at `max(existing ids) + 1` (or 1 if empty).
    pub fn from_products(products: Vec<Product>) -> Self {
        let by_name = products
            .iter()
            .map(|p| (normalize(&p.name), p.id))
            .collect();
        let next_id = products.iter().map(|p| p.id.value()).max().unwrap_or(0) + 1;
        Self {
            products,
            by_name,
            next_id,
        }
    }

    /// The built-in starter catalog, used when no catalog blob exists yet.
    pub fn starter(currency: Currency) -> Self {
        let products = vec![
            ("Basmati Rice (1kg)", 12000, 50),
            ("Refined Sugar (500g)", 5500, 100),
            ("Cooking Oil (1L)", 18000, 30),
            ("Fresh Milk (1L)", 7000, 45),
            ("Masala Powder (100g)", 6500, 75),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, cents, qty))| {
            Product::new(
                ProductId::new(i as u32 + 1),
                name,
                Money::new(cents, currency),
                qty,
            )
        })
        .collect();
        Self::from_products(products)
    }

    /// Add a new product or update an existing one.
    ///
    /// The name match against existing products is case-insensitive: on a hit
    /// the product's price and qty are replaced in place (id unchanged), on a
    /// miss a fresh id is assigned and the product appended.
    ///
    /// Fails with `InvalidInput` if the trimmed name is empty, the price is
    /// not a positive finite number, or the quantity is negative.
    pub fn upsert(
        &mut self,
        name: &str,
        price: f64,
        qty: i64,
        currency: Currency,
    ) -> Result<&Product, ShopError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShopError::InvalidInput(
                "product name must not be empty".to_string(),
            ));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(ShopError::InvalidInput(format!(
                "price must be a positive number, got {price}"
            )));
        }
        if qty < 0 {
            return Err(ShopError::InvalidInput(format!(
                "quantity must not be negative, got {qty}"
            )));
        }

        let price = Money::from_decimal(price, currency);
        let key = normalize(name);

        let idx = match self.by_name.get(&key).copied() {
            Some(id) => {
                // Update in place; the stored name keeps its original casing.
                let idx = self.position(id).ok_or_else(|| {
                    ShopError::NotFound(format!("product id {id} missing from catalog"))
                })?;
                let product = &mut self.products[idx];
                product.price = price;
                product.qty = qty;
                idx
            }
            None => {
                let id = ProductId::new(self.next_id);
                self.next_id += 1;
                self.products.push(Product::new(id, name, price, qty));
                self.by_name.insert(key, id);
                self.products.len() - 1
            }
        };
        Ok(&self.products[idx])
    }

    /// Remove the product with the given name (case-insensitive exact match).
    ///
    /// Fails with `NotFound` if no product matches. Cart lines referencing
    /// the product are untouched; they carry their own name/price snapshots.
    pub fn delete(&mut self, name: &str) -> Result<Product, ShopError> {
        let key = normalize(name);
        let id = *self
            .by_name
            .get(&key)
            .ok_or_else(|| ShopError::NotFound(format!("product \"{}\"", name.trim())))?;
        let idx = self
            .position(id)
            .ok_or_else(|| ShopError::NotFound(format!("product id {id} missing from catalog")))?;
        self.by_name.remove(&key);
        Ok(self.products.remove(idx))
    }

    /// Look up a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let id = *self.by_name.get(&normalize(name))?;
        self.find(id)
    }

    /// Decrement a product's stock, failing rather than going negative.
    ///
    /// A shortfall here means a cart line exceeded the live stock level,
    /// which the cart is supposed to prevent.
    pub(crate) fn decrement_stock(&mut self, id: ProductId, by: i64) -> Result<(), ShopError> {
        let idx = self
            .position(id)
            .ok_or_else(|| ShopError::NotFound(format!("product id {id}")))?;
        let product = &mut self.products[idx];
        if product.qty < by {
            return Err(ShopError::StockInvariant {
                product: product.name.clone(),
                on_hand: product.qty,
                ordered: by,
            });
        }
        product.qty -= by;
        Ok(())
    }

    /// Ordered snapshot of all products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

/// Case-normalized index key for a product name.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
