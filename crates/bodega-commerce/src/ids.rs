//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ProductId where an InvoiceId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate integer-backed newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an ID from a raw integer.
            pub fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw integer value.
            pub fn value(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

// Define all ID types
define_id!(ProductId);
define_id!(InvoiceId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(7);
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_id_display() {
        let id = InvoiceId::new(10234);
        assert_eq!(format!("{}", id), "10234");
    }

    #[test]
    fn test_id_from_u32() {
        let id: ProductId = 3.into();
        assert_eq!(id, ProductId::new(3));
    }

    #[test]
    fn test_id_ordering() {
        assert!(ProductId::new(1) < ProductId::new(2));
    }
}
