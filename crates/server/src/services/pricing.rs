//! Order pricing calculator.
//!
//! The single place totals are computed: the displayed and the charged
//! amounts can never drift because nothing else does this arithmetic.
//!
//! All money math is exact decimal arithmetic; the delivery-fee boundary at
//! the threshold is exclusive (a subtotal of exactly 499 ships free).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::{LineItem, PricingBreakdown};

/// Flat delivery fee charged below the free-delivery threshold.
pub const DELIVERY_FEE: Decimal = dec!(40);

/// Subtotals at or above this ship free; strictly below it pay the fee.
pub const FREE_DELIVERY_THRESHOLD: Decimal = dec!(499);

/// Errors that can occur when computing pricing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The input violates the calculator's contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Compute the pricing breakdown for a list of line items.
///
/// Pure and deterministic: the same items always produce the same
/// breakdown, and nothing is mutated.
///
/// - `subtotal` = Σ(unit price × quantity)
/// - `originalSubtotal` = Σ(original unit price × quantity)
/// - `savings` = max(0, originalSubtotal − subtotal)
/// - `deliveryFee` = 40 if subtotal < 499 else 0
/// - `grandTotal` = subtotal + deliveryFee
///
/// # Errors
///
/// Returns `PricingError::InvalidInput` for an empty item list, a zero
/// quantity, or a negative price. Callers are expected to validate first;
/// this guard exists so a direct call can never yield an all-zero
/// breakdown.
pub fn compute_pricing(items: &[LineItem]) -> Result<PricingBreakdown, PricingError> {
    if items.is_empty() {
        return Err(PricingError::InvalidInput(
            "cannot price an empty item list".to_string(),
        ));
    }

    let mut subtotal = Decimal::ZERO;
    let mut original_subtotal = Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        if item.quantity == 0 {
            return Err(PricingError::InvalidInput(format!(
                "item {index} has zero quantity"
            )));
        }
        if item.unit_price < Decimal::ZERO || item.original_unit_price < Decimal::ZERO {
            return Err(PricingError::InvalidInput(format!(
                "item {index} has a negative price"
            )));
        }

        let quantity = Decimal::from(item.quantity);
        subtotal += item.unit_price * quantity;
        original_subtotal += item.original_unit_price * quantity;
    }

    let savings = if original_subtotal > subtotal {
        original_subtotal - subtotal
    } else {
        Decimal::ZERO
    };

    let delivery_fee = if subtotal < FREE_DELIVERY_THRESHOLD {
        DELIVERY_FEE
    } else {
        Decimal::ZERO
    };

    Ok(PricingBreakdown {
        grand_total: subtotal + delivery_fee,
        subtotal,
        original_subtotal,
        savings,
        delivery_fee,
    })
}
