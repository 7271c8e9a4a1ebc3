//! Startup seed data.
//!
//! The stores are empty at process start; this module fills the catalog
//! across the eight storefront categories and creates the admin account.
//! Seeding is idempotent: a catalog that already has products and a phone
//! that is already registered are both left alone.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use secrecy::ExposeSecret;

use general_store_core::{Email, Phone, ProductId};

use crate::models::{Product, WeightVariant};
use crate::state::AppState;

/// Seed the catalog and the admin account.
pub fn seed(state: &AppState) {
    seed_admin(state);
    seed_catalog(state);
}

fn seed_admin(state: &AppState) {
    let (Ok(email), Ok(phone)) = (
        Email::parse("admin@general-store.local"),
        Phone::parse("9999999999"),
    ) else {
        // Literals above always parse
        return;
    };
    state.auth().seed_admin(
        "Admin User",
        email,
        phone,
        state.config().admin_seed_password.expose_secret(),
    );
}

struct Seed {
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    description: &'static str,
    variants: &'static [(&'static str, &'static str, Decimal, Option<Decimal>)],
}

fn seed_catalog(state: &AppState) {
    if !state.catalog().all().is_empty() {
        return;
    }

    let mut seeded = 0usize;
    for seed in CATALOG {
        let mut product = Product {
            id: ProductId::generate(),
            name: seed.name.to_string(),
            brand: seed.brand.to_string(),
            category: seed.category.to_string(),
            description: seed.description.to_string(),
            image_url: String::new(),
            in_stock: true,
            variants: seed
                .variants
                .iter()
                .map(|&(label, value, price, original)| {
                    WeightVariant::build(label, value, price, original)
                })
                .collect(),
            price: Decimal::ZERO,
            original_price: Decimal::ZERO,
            discount_percent: 0,
            created_at: Utc::now(),
        };
        product.sync_base_pricing();
        if state.catalog().insert(product).is_ok() {
            seeded += 1;
        }
    }
    tracing::info!(products = seeded, "catalog seeded");
}

const CATALOG: &[Seed] = &[
    Seed {
        name: "Basmati Rice",
        brand: "Annapurna",
        category: "kitchen",
        description: "Long-grain aged basmati rice.",
        variants: &[
            ("1 kg", "1 kg", dec!(120), Some(dec!(140))),
            ("5 kg", "5 kg", dec!(560), Some(dec!(650))),
        ],
    },
    Seed {
        name: "Toor Dal",
        brand: "Annapurna",
        category: "kitchen",
        description: "Unpolished toor dal.",
        variants: &[
            ("500 g", "500 g", dec!(85), None),
            ("1 kg", "1 kg", dec!(165), Some(dec!(180))),
        ],
    },
    Seed {
        name: "Sunflower Oil",
        brand: "GoldDrop",
        category: "kitchen",
        description: "Refined sunflower cooking oil.",
        variants: &[("1 l", "1 l", dec!(145), Some(dec!(160)))],
    },
    Seed {
        name: "Masala Potato Chips",
        brand: "CrispCo",
        category: "snacks",
        description: "Spicy masala-coated potato chips.",
        variants: &[
            ("90 g", "90 g", dec!(30), None),
            ("200 g", "200 g", dec!(60), Some(dec!(70))),
        ],
    },
    Seed {
        name: "Roasted Peanuts",
        brand: "CrispCo",
        category: "snacks",
        description: "Salted roasted peanuts.",
        variants: &[("250 g", "250 g", dec!(55), Some(dec!(65)))],
    },
    Seed {
        name: "Green Tea",
        brand: "Leaf & Bud",
        category: "beverages",
        description: "Whole-leaf green tea.",
        variants: &[("100 g", "100 g", dec!(180), Some(dec!(220)))],
    },
    Seed {
        name: "Filter Coffee Powder",
        brand: "Leaf & Bud",
        category: "beverages",
        description: "South Indian filter coffee blend, 80:20.",
        variants: &[
            ("250 g", "250 g", dec!(160), None),
            ("500 g", "500 g", dec!(310), Some(dec!(330))),
        ],
    },
    Seed {
        name: "Toned Milk",
        brand: "Gokul",
        category: "dairy",
        description: "Pasteurized toned milk pouch.",
        variants: &[("500 ml", "500 ml", dec!(27), None)],
    },
    Seed {
        name: "Curd",
        brand: "Gokul",
        category: "dairy",
        description: "Set curd cup.",
        variants: &[
            ("400 g", "400 g", dec!(40), None),
            ("1 kg", "1 kg", dec!(90), Some(dec!(95))),
        ],
    },
    Seed {
        name: "Whole Wheat Bread",
        brand: "Morning Oven",
        category: "bakery",
        description: "Sliced whole wheat loaf.",
        variants: &[("400 g", "400 g", dec!(45), Some(dec!(50)))],
    },
    Seed {
        name: "Butter Rusk",
        brand: "Morning Oven",
        category: "bakery",
        description: "Crisp butter rusk toast.",
        variants: &[("300 g", "300 g", dec!(55), None)],
    },
    Seed {
        name: "Turmeric Powder",
        brand: "Spice Route",
        category: "spices",
        description: "Single-origin Salem turmeric.",
        variants: &[
            ("100 g", "100 g", dec!(35), None),
            ("500 g", "500 g", dec!(150), Some(dec!(170))),
        ],
    },
    Seed {
        name: "Garam Masala",
        brand: "Spice Route",
        category: "spices",
        description: "Stone-ground garam masala blend.",
        variants: &[("100 g", "100 g", dec!(75), Some(dec!(85)))],
    },
    Seed {
        name: "Aloe Vera Face Wash",
        brand: "Herbally",
        category: "beauty",
        description: "Gentle aloe vera face wash.",
        variants: &[("150 ml", "150 ml", dec!(130), Some(dec!(150)))],
    },
    Seed {
        name: "Coconut Hair Oil",
        brand: "Herbally",
        category: "beauty",
        description: "Cold-pressed coconut hair oil.",
        variants: &[("200 ml", "200 ml", dec!(95), None)],
    },
    Seed {
        name: "Dishwash Liquid",
        brand: "SparkleHome",
        category: "household",
        description: "Lemon dishwash liquid refill.",
        variants: &[
            ("500 ml", "500 ml", dec!(99), Some(dec!(110))),
            ("1 l", "1 l", dec!(185), Some(dec!(210))),
        ],
    },
    Seed {
        name: "Detergent Powder",
        brand: "SparkleHome",
        category: "household",
        description: "Top-load detergent powder.",
        variants: &[("1 kg", "1 kg", dec!(140), Some(dec!(155)))],
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_fills_all_categories() {
        let state = AppState::for_tests();
        seed(&state);

        let categories = state.catalog().categories();
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        for expected in [
            "kitchen",
            "snacks",
            "beverages",
            "dairy",
            "bakery",
            "spices",
            "beauty",
            "household",
        ] {
            assert!(slugs.contains(&expected), "missing category {expected}");
        }
    }

    #[test]
    fn test_seed_is_idempotent() {
        let state = AppState::for_tests();
        seed(&state);
        let count = state.catalog().all().len();
        seed(&state);
        assert_eq!(state.catalog().all().len(), count);
    }

    #[test]
    fn test_admin_account_can_login() {
        let state = AppState::for_tests();
        seed(&state);

        let session = state
            .auth()
            .login("admin@general-store.local", "admin123")
            .unwrap();
        assert!(session.role.is_admin());
    }

    #[test]
    fn test_base_pricing_mirrors_first_variant() {
        let state = AppState::for_tests();
        seed(&state);

        for product in state.catalog().all() {
            let base = product.variants.first().unwrap();
            assert_eq!(product.price, base.price);
            assert_eq!(product.original_price, base.original_price);
        }
    }
}
