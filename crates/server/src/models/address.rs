//! Address domain types.
//!
//! Two shapes exist on the wire: the delivery [`Address`] snapshot attached to
//! an order (keyed `fullName`), and the [`SavedAddress`] book entry (keyed
//! `name`, with a label and a default flag).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use general_store_core::{AddressId, Phone, Pincode};

use super::FieldError;

/// A delivery address.
///
/// Immutable once attached to an order: the order holds a copy, so later
/// edits to the address book never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub phone: String,
    pub line1: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl Address {
    /// Validate every field, collecting all failures.
    ///
    /// Field names in the returned errors are prefixed with `address.` so the
    /// client can attach them to the right form inputs.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per failing field.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().len() < 2 {
            errors.push(FieldError::new(
                "address.fullName",
                "Full name must be at least 2 characters",
            ));
        }

        if Phone::parse(&self.phone).is_err() {
            errors.push(FieldError::new(
                "address.phone",
                "Phone must be 10 digits",
            ));
        }

        if self.line1.trim().len() < 5 {
            errors.push(FieldError::new(
                "address.line1",
                "Address line must be at least 5 characters",
            ));
        }

        if self.city.trim().len() < 2 {
            errors.push(FieldError::new(
                "address.city",
                "City must be at least 2 characters",
            ));
        }

        if self.state.trim().len() < 2 {
            errors.push(FieldError::new(
                "address.state",
                "State must be at least 2 characters",
            ));
        }

        if Pincode::parse(&self.pincode).is_err() {
            errors.push(FieldError::new(
                "address.pincode",
                "Pincode must be 6 digits",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// An address book entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    pub id: AddressId,
    /// Short tag chosen by the user (e.g., "Home", "Office").
    pub label: String,
    pub name: String,
    pub phone: String,
    pub line1: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SavedAddress {
    /// Validate the entry, collecting all failures.
    ///
    /// Same field rules as [`Address::validate`], plus a required label.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per failing field.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = match self.delivery_address().validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };

        if self.label.trim().is_empty() {
            errors.push(FieldError::new("address.label", "Label is required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The delivery snapshot shape of this entry.
    #[must_use]
    pub fn delivery_address(&self) -> Address {
        Address {
            full_name: self.name.clone(),
            phone: self.phone.clone(),
            line1: self.line1.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            pincode: self.pincode.clone(),
        }
    }
}
