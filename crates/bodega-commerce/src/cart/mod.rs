//! Shopping cart module.
//!
//! Contains the cart, its line items, and totals calculation.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine};
pub use pricing::CartTotals;
