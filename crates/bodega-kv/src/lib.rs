//! Named-blob Key-Value persistence layer for the bodega storefront.
//!
//! Provides a simple, ergonomic API for storing whole entities as named blobs
//! with automatic JSON serialization. On WASM targets the blobs live in Spin's
//! Key-Value Store; on native targets they live in a process-wide in-memory
//! registry so that reopening a store by name within the same process recovers
//! whatever was last written.
//!
//! # Example
//!
//! ```rust,ignore
//! use bodega_kv::Store;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//! }
//!
//! let store = Store::open_default()?;
//!
//! // Persist the whole catalog as one blob
//! store.set("catalog", &products)?;
//!
//! // Absent blob means "use defaults"
//! let products: Option<Vec<Product>> = store.get("catalog")?;
//! ```

mod error;
mod kv;

pub use error::StoreError;
pub use kv::Store;
