//! Catalog store.

use std::sync::RwLock;

use serde::Serialize;

use general_store_core::ProductId;

use super::StoreError;
use crate::models::{Product, VariantPricing};

/// A product category, derived from the products present in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// URL-safe identifier (e.g., "kitchen").
    pub slug: String,
    /// Display name (e.g., "Kitchen").
    pub name: String,
}

/// Storage interface for the product catalog.
///
/// Read-only from the order unit's perspective; the admin endpoints use the
/// mutation methods. Categories are derived from products, never stored.
pub trait CatalogStore: Send + Sync {
    /// Every product, in insertion order.
    fn all(&self) -> Vec<Product>;

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn find_by_id(&self, id: ProductId) -> Result<Product, StoreError>;

    /// Products in a category (case-insensitive exact match on the slug).
    fn find_by_category(&self, category: &str) -> Vec<Product>;

    /// Case-insensitive substring search over name, brand, and category.
    fn search(&self, query: &str) -> Vec<Product>;

    /// Trimmed product projections for typeahead. An empty query yields an
    /// empty list.
    fn suggestions(&self, query: &str, limit: usize) -> Vec<Product>;

    /// Distinct categories present in the catalog, in first-seen order.
    fn categories(&self) -> Vec<Category>;

    /// Resolve pricing for a product variant selector.
    ///
    /// Returns `None` for an unknown product or an unresolvable selector.
    fn variant_pricing(&self, id: ProductId, selector: &str) -> Option<VariantPricing>;

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if a product with the same id exists.
    fn insert(&self, product: Product) -> Result<(), StoreError>;

    /// Replace a product in place, identity preserved by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn update(&self, product: Product) -> Result<Product, StoreError>;

    /// Remove a product, returning it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn delete(&self, id: ProductId) -> Result<Product, StoreError>;
}

/// In-memory [`CatalogStore`] over a locked vector.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    products: RwLock<Vec<Product>>,
}

/// Display name for a category slug: first letter upper-cased.
fn display_name(slug: &str) -> String {
    let mut chars = slug.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

impl MemoryCatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn all(&self) -> Vec<Product> {
        self.read().clone()
    }

    fn find_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        self.read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("Product"))
    }

    fn find_by_category(&self, category: &str) -> Vec<Product> {
        let needle = category.trim().to_lowercase();
        self.read()
            .iter()
            .filter(|p| p.category.trim().to_lowercase() == needle)
            .cloned()
            .collect()
    }

    fn search(&self, query: &str) -> Vec<Product> {
        self.read()
            .iter()
            .filter(|p| p.matches_search(query))
            .cloned()
            .collect()
    }

    fn suggestions(&self, query: &str, limit: usize) -> Vec<Product> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.read()
            .iter()
            .filter(|p| p.matches_search(query))
            .take(limit)
            .cloned()
            .collect()
    }

    fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for product in self.read().iter() {
            let slug = product.category.trim().to_lowercase();
            if !seen.iter().any(|c: &Category| c.slug == slug) {
                seen.push(Category {
                    name: display_name(&slug),
                    slug,
                });
            }
        }
        seen
    }

    fn variant_pricing(&self, id: ProductId, selector: &str) -> Option<VariantPricing> {
        self.find_by_id(id).ok()?.variant_pricing(selector)
    }

    fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.write();
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::Conflict(format!(
                "product {} already exists",
                product.id
            )));
        }
        products.push(product);
        Ok(())
    }

    fn update(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.write();
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(StoreError::NotFound("Product"))?;
        *slot = product.clone();
        Ok(product)
    }

    fn delete(&self, id: ProductId) -> Result<Product, StoreError> {
        let mut products = self.write();
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound("Product"))?;
        Ok(products.remove(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::WeightVariant;

    fn product(name: &str, category: &str) -> Product {
        let mut product = Product {
            id: ProductId::generate(),
            name: name.to_string(),
            brand: "General Store".to_string(),
            category: category.to_string(),
            description: String::new(),
            image_url: String::new(),
            in_stock: true,
            variants: vec![WeightVariant::build("1 kg", "1 kg", dec!(100), Some(dec!(120)))],
            price: dec!(0),
            original_price: dec!(0),
            discount_percent: 0,
            created_at: Utc::now(),
        };
        product.sync_base_pricing();
        product
    }

    fn seeded() -> MemoryCatalogStore {
        let store = MemoryCatalogStore::new();
        store.insert(product("Basmati Rice", "kitchen")).unwrap();
        store.insert(product("Masala Chips", "snacks")).unwrap();
        store.insert(product("Green Tea", "beverages")).unwrap();
        store.insert(product("Rice Crackers", "snacks")).unwrap();
        store
    }

    #[test]
    fn test_find_by_category_case_insensitive() {
        let store = seeded();
        assert_eq!(store.find_by_category("SNACKS").len(), 2);
        assert_eq!(store.find_by_category(" snacks ").len(), 2);
        assert!(store.find_by_category("dairy").is_empty());
    }

    #[test]
    fn test_search_spans_name_brand_category() {
        let store = seeded();
        assert_eq!(store.search("rice").len(), 2);
        assert_eq!(store.search("beverages").len(), 1);
        // Brand matches every product
        assert_eq!(store.search("general").len(), 4);
    }

    #[test]
    fn test_suggestions_limit_and_empty_query() {
        let store = seeded();
        assert_eq!(store.suggestions("general", 2).len(), 2);
        assert!(store.suggestions("", 6).is_empty());
        assert!(store.suggestions("   ", 6).is_empty());
    }

    #[test]
    fn test_categories_distinct_first_seen_order() {
        let store = seeded();
        let categories = store.categories();
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["kitchen", "snacks", "beverages"]);
        assert_eq!(categories[0].name, "Kitchen");
    }

    #[test]
    fn test_variant_pricing_unknown_product() {
        let store = seeded();
        assert!(store.variant_pricing(ProductId::generate(), "1 kg").is_none());
    }

    #[test]
    fn test_variant_pricing_proportional_through_store() {
        let store = MemoryCatalogStore::new();
        let rice = product("Basmati Rice", "kitchen");
        let id = rice.id;
        store.insert(rice).unwrap();

        let pricing = store.variant_pricing(id, "500 g").unwrap();
        assert_eq!(pricing.price, dec!(50.00));
    }

    #[test]
    fn test_update_and_delete() {
        let store = seeded();
        let mut first = store.all().remove(0);
        first.in_stock = false;
        store.update(first.clone()).unwrap();
        assert!(!store.find_by_id(first.id).unwrap().in_stock);

        let removed = store.delete(first.id).unwrap();
        assert_eq!(removed.id, first.id);
        assert_eq!(
            store.find_by_id(first.id),
            Err(StoreError::NotFound("Product"))
        );
    }

    #[test]
    fn test_delete_unknown_product() {
        let store = MemoryCatalogStore::new();
        assert_eq!(
            store.delete(ProductId::generate()),
            Err(StoreError::NotFound("Product"))
        );
    }
}
