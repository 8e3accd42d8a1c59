//! Storefront error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Every variant is recoverable by the caller: the kind identifies what went
/// wrong and the message is suitable for surfacing to the operator as-is. A
/// failed operation leaves all entities in their pre-call state.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Malformed or out-of-range user-supplied fields.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced product doesn't exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested quantity is non-positive or exceeds available stock.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Merging into an existing cart line would exceed available stock.
    #[error("Insufficient stock for {product}: requested {requested}, only {remaining} left")]
    InsufficientStock {
        product: String,
        requested: i64,
        remaining: i64,
    },

    /// Checkout attempted with no cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Stock would go negative during checkout. The cart caps every line at
    /// the live stock level, so this indicates a logic fault upstream.
    #[error("Stock invariant violated for {product}: {ordered} ordered, {on_hand} on hand")]
    StockInvariant {
        product: String,
        on_hand: i64,
        ordered: i64,
    },

    /// Owner password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Arithmetic overflow in money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Persistence layer failure.
    #[error("Store error: {0}")]
    Store(#[from] bodega_kv::StoreError),
}
