//! Cart totals calculation.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals for the cart, ready for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of order quantities across all lines.
    pub total_items: i64,
    /// Sum of snapshot price times quantity across all lines.
    pub grand_total: Money,
}

impl CartTotals {
    /// Check if there is anything to total.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}
