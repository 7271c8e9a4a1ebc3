//! Order store.

use std::sync::RwLock;

use general_store_core::{OrderId, UserId};

use super::StoreError;
use crate::models::Order;

/// Storage interface for orders.
///
/// Orders are never deleted; cancellation is a status change recorded via
/// [`update`](Self::update). Listings return most-recent-first.
pub trait OrderStore: Send + Sync {
    /// Insert a newly created order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if an order with the same id exists.
    fn insert(&self, order: Order) -> Result<(), StoreError>;

    /// Look up an order by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn find_by_id(&self, id: OrderId) -> Result<Order, StoreError>;

    /// Every order for a customer, most-recent-first.
    fn find_by_customer(&self, customer_id: UserId) -> Vec<Order>;

    /// Every order in the system, most-recent-first.
    fn all(&self) -> Vec<Order>;

    /// Replace an order in place, identity preserved by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn update(&self, order: Order) -> Result<Order, StoreError>;
}

/// In-memory [`OrderStore`] over a locked vector.
///
/// New orders are pushed to the front, so iteration order is
/// most-recent-first without sorting.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Order>> {
        self.orders.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Order>> {
        self.orders.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl OrderStore for MemoryOrderStore {
    fn insert(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.write();
        if orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::Conflict(format!(
                "order {} already exists",
                order.id
            )));
        }
        orders.insert(0, order);
        Ok(())
    }

    fn find_by_id(&self, id: OrderId) -> Result<Order, StoreError> {
        self.read()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("Order"))
    }

    fn find_by_customer(&self, customer_id: UserId) -> Vec<Order> {
        self.read()
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect()
    }

    fn all(&self) -> Vec<Order> {
        self.read().clone()
    }

    fn update(&self, order: Order) -> Result<Order, StoreError> {
        let mut orders = self.write();
        let slot = orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or(StoreError::NotFound("Order"))?;
        *slot = order.clone();
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use general_store_core::{OrderStatus, PaymentMethod};

    use super::*;
    use crate::models::{Address, LineItem, PricingBreakdown};

    fn order_for(customer_id: UserId) -> Order {
        Order::new(
            customer_id,
            vec![LineItem {
                product_id: "p-1".to_string(),
                name: "Tea".to_string(),
                brand: "General Store".to_string(),
                unit_price: dec!(50),
                original_unit_price: dec!(50),
                quantity: 1,
                variant_label: "250 g".to_string(),
            }],
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
                subtotal: dec!(50),
                original_subtotal: dec!(50),
                savings: dec!(0),
                delivery_fee: dec!(40),
                grand_total: dec!(90),
            },
        )
    }

    #[test]
    fn test_insert_and_find() {
        let store = MemoryOrderStore::new();
        let order = order_for(UserId::generate());
        let id = order.id;

        store.insert(order).unwrap();
        assert_eq!(store.find_by_id(id).unwrap().id, id);
    }

    #[test]
    fn test_find_unknown_id() {
        let store = MemoryOrderStore::new();
        assert_eq!(
            store.find_by_id(OrderId::generate()),
            Err(StoreError::NotFound("Order"))
        );
    }

    #[test]
    fn test_duplicate_insert_conflicts() {
        let store = MemoryOrderStore::new();
        let order = order_for(UserId::generate());

        store.insert(order.clone()).unwrap();
        assert!(matches!(
            store.insert(order),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_listings_are_most_recent_first() {
        let store = MemoryOrderStore::new();
        let customer = UserId::generate();
        let first = order_for(customer);
        let second = order_for(customer);

        store.insert(first.clone()).unwrap();
        store.insert(second.clone()).unwrap();

        let all = store.all();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);

        let mine = store.find_by_customer(customer);
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, second.id);
    }

    #[test]
    fn test_find_by_customer_filters() {
        let store = MemoryOrderStore::new();
        let customer = UserId::generate();
        store.insert(order_for(customer)).unwrap();
        store.insert(order_for(UserId::generate())).unwrap();

        assert_eq!(store.find_by_customer(customer).len(), 1);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let store = MemoryOrderStore::new();
        let mut order = order_for(UserId::generate());
        store.insert(order.clone()).unwrap();

        order.status = OrderStatus::Confirmed;
        store.update(order.clone()).unwrap();

        assert_eq!(
            store.find_by_id(order.id).unwrap().status,
            OrderStatus::Confirmed
        );
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_update_unknown_id() {
        let store = MemoryOrderStore::new();
        assert_eq!(
            store.update(order_for(UserId::generate())),
            Err(StoreError::NotFound("Order"))
        );
    }
}
