//! Point-of-sale domain types and logic for the bodega storefront.
//!
//! This crate is the state core of a single-store storefront:
//!
//! - **Catalog**: products with stock levels, case-insensitive unique names
//! - **Cart**: stock-aware line items with price snapshots
//! - **Checkout**: finalizes a cart into an immutable sale and decrements stock
//! - **Shop**: the state-owning facade that persists every mutation
//!
//! Durable state (catalog, sales ledger, theme preference) lives in a
//! [`bodega_kv::Store`] as three named blobs; the cart is in-memory only.
//! The presentation layer consumes these managers exclusively through their
//! public operations and re-renders from the returned snapshots.
//!
//! # Example
//!
//! ```rust,ignore
//! use bodega_commerce::prelude::*;
//! use bodega_kv::Store;
//!
//! let mut shop = Shop::open(Store::open_default()?)?;
//!
//! // Owner adds a product (or updates it by the same name)
//! let product = shop.upsert_product("Basmati Rice (1kg)", 120.0, 50)?;
//!
//! // Customer builds a cart and checks out
//! shop.add_to_cart(product.id, 2)?;
//! let sale = shop.checkout("Rahim Uddin", "01700000000")?;
//! println!("invoice {} total {}", sale.invoice_id, sale.total_amount);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod owner;
pub mod shop;
pub mod theme;

pub use error::ShopError;
pub use ids::*;
pub use money::{Currency, Money};
pub use shop::{Shop, ShopConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::ShopError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartTotals};

    // Checkout
    pub use crate::checkout::{Sale, SaleLineItem, SalesLedger};

    // Shop facade
    pub use crate::owner::OwnerSummary;
    pub use crate::shop::{Shop, ShopConfig};
    pub use crate::theme::Theme;
}
