//! Checkout module.
//!
//! Contains the immutable sale record and the append-only sales ledger.

mod sale;

pub use sale::{Sale, SaleLineItem, SalesLedger};
