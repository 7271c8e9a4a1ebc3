//! Product domain types and variant pricing.
//!
//! Each product carries one or more weight variants, each with its own price.
//! The first variant is the base variant: the product's top-level price
//! mirrors it, and proportional pricing scales from it when a requested
//! variant has no explicit price.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use general_store_core::ProductId;

/// Matches a measure like "1 kg", "500g", "1.5 l", "6 pcs".
static MEASURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a literal, cannot fail
    Regex::new(r"([0-9.]+)\s*(kg|g|l|ml|pc|pcs)").unwrap()
});

/// A purchasable size/weight option of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightVariant {
    /// Display label (e.g., "1 kg Pack").
    pub label: String,
    /// Measure string the selector matches against (e.g., "1 kg").
    pub value: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub discount_percent: u32,
}

impl WeightVariant {
    /// Build a variant, filling in the derived fields.
    ///
    /// A missing original price falls back to the price itself, and the
    /// discount percent is recomputed from the pair.
    #[must_use]
    pub fn build(
        label: impl Into<String>,
        value: impl Into<String>,
        price: Decimal,
        original_price: Option<Decimal>,
    ) -> Self {
        let original_price = original_price.unwrap_or(price);
        Self {
            label: label.into(),
            value: value.into(),
            price,
            original_price,
            discount_percent: discount_percent(price, original_price),
        }
    }
}

/// Percentage discount of `price` against `original_price`, rounded to the
/// nearest whole percent. Zero when there is no discount.
#[must_use]
pub fn discount_percent(price: Decimal, original_price: Decimal) -> u32 {
    if original_price <= price || original_price.is_zero() {
        return 0;
    }
    let percent = (original_price - price) / original_price * Decimal::from(100);
    percent.round().to_u32().unwrap_or(0)
}

/// Resolved pricing for a requested product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPricing {
    pub price: Decimal,
    pub original_price: Decimal,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    /// Category slug (e.g., "kitchen", "snacks").
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub in_stock: bool,
    /// Base variant first; must never be empty.
    pub variants: Vec<WeightVariant>,
    /// Mirrors the base variant.
    pub price: Decimal,
    pub original_price: Decimal,
    pub discount_percent: u32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Re-derive the top-level price fields from the base variant.
    pub fn sync_base_pricing(&mut self) {
        if let Some(base) = self.variants.first() {
            self.price = base.price;
            self.original_price = base.original_price;
            self.discount_percent = base.discount_percent;
        }
    }

    /// Case-insensitive substring match over name, brand, and category.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let haystack = format!("{} {} {}", self.name, self.brand, self.category).to_lowercase();
        haystack.contains(&needle.trim().to_lowercase())
    }

    /// Resolve pricing for a variant selector.
    ///
    /// An exact match on a variant's value (or label) wins. Otherwise the
    /// base variant's prices are scaled proportionally by parsed measure,
    /// rounded to 2 decimal places. Returns `None` when the selector or the
    /// base variant cannot be parsed, or when their measure kinds differ.
    #[must_use]
    pub fn variant_pricing(&self, selector: &str) -> Option<VariantPricing> {
        if let Some(variant) = self
            .variants
            .iter()
            .find(|v| v.value.eq_ignore_ascii_case(selector.trim()))
            .or_else(|| {
                self.variants
                    .iter()
                    .find(|v| v.label.eq_ignore_ascii_case(selector.trim()))
            })
        {
            return Some(VariantPricing {
                price: variant.price,
                original_price: variant.original_price,
            });
        }

        let base = self.variants.first()?;
        let base_measure = parse_measure(&base.value)?;
        let selected_measure = parse_measure(selector)?;

        if base_measure.kind != selected_measure.kind || base_measure.quantity.is_zero() {
            return None;
        }

        let factor = selected_measure.quantity / base_measure.quantity;
        Some(VariantPricing {
            price: (base.price * factor).round_dp(2),
            original_price: (base.original_price * factor).round_dp(2),
        })
    }
}

/// What a measure string quantifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    Weight,
    Volume,
    Count,
}

/// A parsed measure, normalized to its smallest unit (g, ml, or pieces).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measure {
    pub quantity: Decimal,
    pub kind: MeasureKind,
}

/// Parse a measure like "1 kg" or "500ml" out of a variant value string.
///
/// kg and l are normalized to g and ml (×1000). Returns `None` for
/// unparsable input.
#[must_use]
pub fn parse_measure(value: &str) -> Option<Measure> {
    let normalized = value.trim().to_lowercase();
    let captures = MEASURE_RE.captures(&normalized)?;
    let amount: Decimal = captures.get(1)?.as_str().parse().ok()?;

    let (quantity, kind) = match captures.get(2)?.as_str() {
        "kg" => (amount * Decimal::from(1000), MeasureKind::Weight),
        "g" => (amount, MeasureKind::Weight),
        "l" => (amount * Decimal::from(1000), MeasureKind::Volume),
        "ml" => (amount, MeasureKind::Volume),
        "pc" | "pcs" => (amount, MeasureKind::Count),
        _ => return None,
    };

    Some(Measure { quantity, kind })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn rice() -> Product {
        Product {
            id: ProductId::generate(),
            name: "Basmati Rice".to_string(),
            brand: "General Store".to_string(),
            category: "kitchen".to_string(),
            description: "Long-grain aromatic rice".to_string(),
            image_url: "/uploads/rice.jpg".to_string(),
            in_stock: true,
            variants: vec![
                WeightVariant::build("1 kg Pack", "1 kg", dec!(100), Some(dec!(120))),
                WeightVariant::build("5 kg Pack", "5 kg", dec!(460), Some(dec!(560))),
            ],
            price: dec!(100),
            original_price: dec!(120),
            discount_percent: 17,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_measure() {
        assert_eq!(
            parse_measure("1 kg").unwrap(),
            Measure {
                quantity: dec!(1000),
                kind: MeasureKind::Weight
            }
        );
        assert_eq!(
            parse_measure("500g").unwrap(),
            Measure {
                quantity: dec!(500),
                kind: MeasureKind::Weight
            }
        );
        assert_eq!(parse_measure("1.5 l").unwrap().quantity, dec!(1500));
        assert_eq!(parse_measure("6 pcs").unwrap().kind, MeasureKind::Count);
        assert!(parse_measure("large").is_none());
        assert!(parse_measure("").is_none());
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(discount_percent(dec!(100), dec!(120)), 17);
        assert_eq!(discount_percent(dec!(300), dec!(300)), 0);
        assert_eq!(discount_percent(dec!(120), dec!(100)), 0);
        assert_eq!(discount_percent(dec!(50), dec!(100)), 50);
    }

    #[test]
    fn test_variant_pricing_exact_match() {
        let pricing = rice().variant_pricing("5 kg").unwrap();
        assert_eq!(pricing.price, dec!(460));
        assert_eq!(pricing.original_price, dec!(560));
    }

    #[test]
    fn test_variant_pricing_label_fallback() {
        let pricing = rice().variant_pricing("5 kg Pack").unwrap();
        assert_eq!(pricing.price, dec!(460));
    }

    #[test]
    fn test_variant_pricing_proportional() {
        // 1 kg base at 100 -> 500 g = 50
        let pricing = rice().variant_pricing("500 g").unwrap();
        assert_eq!(pricing.price, dec!(50.00));
        assert_eq!(pricing.original_price, dec!(60.00));
    }

    #[test]
    fn test_variant_pricing_mismatched_kinds() {
        // Weight base cannot price a volume selector
        assert!(rice().variant_pricing("500 ml").is_none());
    }

    #[test]
    fn test_variant_pricing_unparsable_selector() {
        assert!(rice().variant_pricing("family pack").is_none());
    }

    #[test]
    fn test_variant_build_fills_defaults() {
        let variant = WeightVariant::build("250 g", "250 g", dec!(30), None);
        assert_eq!(variant.original_price, dec!(30));
        assert_eq!(variant.discount_percent, 0);
    }

    #[test]
    fn test_sync_base_pricing() {
        let mut product = rice();
        product.variants[0] = WeightVariant::build("1 kg", "1 kg", dec!(90), Some(dec!(120)));
        product.sync_base_pricing();
        assert_eq!(product.price, dec!(90));
        assert_eq!(product.discount_percent, 25);
    }

    #[test]
    fn test_matches_search() {
        let product = rice();
        assert!(product.matches_search("basmati"));
        assert!(product.matches_search("KITCHEN"));
        assert!(product.matches_search(" store "));
        assert!(!product.matches_search("shampoo"));
    }
}
