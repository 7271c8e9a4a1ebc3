//! In-memory stores for the General Store backend.
//!
//! Every collection lives in process memory with process-wide lifetime:
//! created empty at startup, discarded at exit. Each store is exposed as a
//! trait so the services never touch a concrete collection, and storage can
//! be swapped for a real database without touching the pricing or lifecycle
//! logic.
//!
//! # Stores
//!
//! - `orders` - Orders, queried by id or customer; no deletion
//! - `catalog` - Products and their derived category list
//! - `users` - Accounts for customers and admins
//! - `addresses` - The shared address book
//!
//! Each store operation takes its own `RwLock` guard and is atomic on its
//! own; read-modify-write sequences are serialized by the owning service.

pub mod addresses;
pub mod catalog;
pub mod orders;
pub mod users;

pub use addresses::{AddressStore, MemoryAddressStore};
pub use catalog::{CatalogStore, Category, MemoryCatalogStore};
pub use orders::{MemoryOrderStore, OrderStore};
pub use users::{MemoryUserStore, UserStore};

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the given id.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}
