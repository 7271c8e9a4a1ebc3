//! Order domain types.
//!
//! An [`Order`] is created in one atomic step from a priced cart and a
//! validated address snapshot. After creation it is mutated only through
//! status transitions and cancellation, and it is never deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use general_store_core::{OrderId, OrderStatus, PaymentMethod, UserId};

use super::{Address, FieldError};

/// One product-variant-quantity entry within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub unit_price: Decimal,
    pub original_unit_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub variant_label: String,
}

impl LineItem {
    /// Validate the item, collecting all failures.
    ///
    /// Field names in the returned errors carry the item's position
    /// (e.g., `items[2].quantity`).
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per failing field.
    pub fn validate(&self, index: usize) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.quantity == 0 {
            errors.push(FieldError::new(
                format!("items[{index}].quantity"),
                "Quantity must be at least 1",
            ));
        }

        if self.unit_price < Decimal::ZERO {
            errors.push(FieldError::new(
                format!("items[{index}].unitPrice"),
                "Unit price cannot be negative",
            ));
        }

        if self.original_unit_price < Decimal::ZERO {
            errors.push(FieldError::new(
                format!("items[{index}].originalUnitPrice"),
                "Original unit price cannot be negative",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Derived pricing totals for an order.
///
/// Every field is computed from the line items; none is independently set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub subtotal: Decimal,
    pub original_subtotal: Decimal,
    pub savings: Decimal,
    pub delivery_fee: Decimal,
    pub grand_total: Decimal,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Customer the order is tagged with. Named `userId` on the wire.
    #[serde(rename = "userId")]
    pub customer_id: UserId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Snapshot taken at creation; never a reference into the address book.
    pub address: Address,
    pub items: Vec<LineItem>,
    pub pricing: PricingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

impl Order {
    /// Create a new order in the `pending` state with a fresh id.
    #[must_use]
    pub fn new(
        customer_id: UserId,
        items: Vec<LineItem>,
        address: Address,
        payment_method: PaymentMethod,
        pricing: PricingBreakdown,
    ) -> Self {
        Self {
            id: OrderId::generate(),
            customer_id,
            created_at: Utc::now(),
            status: OrderStatus::Pending,
            payment_method,
            address,
            items,
            pricing,
            updated_at: None,
            cancelled_at: None,
            cancel_reason: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn item(quantity: u32) -> LineItem {
        LineItem {
            product_id: "p-1".to_string(),
            name: "Basmati Rice".to_string(),
            brand: "General Store".to_string(),
            unit_price: dec!(100),
            original_unit_price: dec!(120),
            quantity,
            variant_label: "1 kg".to_string(),
        }
    }

    #[test]
    fn test_item_valid() {
        assert!(item(1).validate(0).is_ok());
    }

    #[test]
    fn test_item_zero_quantity() {
        let errors = item(0).validate(3).unwrap_err();
        assert_eq!(errors[0].field, "items[3].quantity");
    }

    #[test]
    fn test_item_negative_price() {
        let mut bad = item(1);
        bad.unit_price = dec!(-1);
        let errors = bad.validate(0).unwrap_err();
        assert_eq!(errors[0].field, "items[0].unitPrice");
    }

    #[test]
    fn test_item_deserializes_with_defaults() {
        let parsed: LineItem = serde_json::from_str(
            r#"{"productId":"p-1","name":"Tea","unitPrice":"50","originalUnitPrice":60,"quantity":2}"#,
        )
        .unwrap();
        assert_eq!(parsed.quantity, 2);
        assert_eq!(parsed.unit_price, dec!(50));
        assert_eq!(parsed.original_unit_price, dec!(60));
        assert!(parsed.brand.is_empty());
    }

    #[test]
    fn test_order_wire_shape() {
        let order = Order::new(
            UserId::generate(),
            vec![item(1)],
            Address {
                full_name: "Asha Rao".to_string(),
                phone: "9876543210".to_string(),
                line1: "12 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                pincode: "560001".to_string(),
            },
            PaymentMethod::Cod,
            PricingBreakdown {
                subtotal: dec!(100),
                original_subtotal: dec!(120),
                savings: dec!(20),
                delivery_fee: dec!(40),
                grand_total: dec!(140),
            },
        );

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["paymentMethod"], "cod");
        assert!(json.get("userId").is_some());
        // Unset optionals stay off the wire
        assert!(json.get("cancelledAt").is_none());
        assert!(json.get("cancelReason").is_none());
    }
}
