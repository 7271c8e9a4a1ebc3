//! Domain types for the General Store backend.
//!
//! These types represent validated domain objects. Wire-facing structs use
//! camelCase field names to match the SPA client.

pub mod address;
pub mod order;
pub mod product;
pub mod user;

pub use address::{Address, SavedAddress};
pub use order::{LineItem, Order, PricingBreakdown};
pub use product::{Product, VariantPricing, WeightVariant};
pub use user::{User, UserView};

use serde::Serialize;

/// A single failed validation rule, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field (e.g., `address.pincode`, `items[0].quantity`).
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
