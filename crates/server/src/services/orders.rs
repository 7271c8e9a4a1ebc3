//! Order lifecycle service.
//!
//! Owns order creation, status transitions, and cancellation. Creation is a
//! single atomic step: validation and pricing both happen before anything
//! touches the store, so a failed creation never inserts.
//!
//! Status transitions are deliberately permissive: any recognized status may
//! be set at any time, including skipping forward (`pending` straight to
//! `delivered`) or moving backwards. Only cancellation is guarded, and only
//! by the terminal states. Whether skipping is a business allowance or an
//! oversight is an open product question; until answered, the observed
//! behavior stands.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use thiserror::Error;

use general_store_core::{OrderId, OrderStatus, PaymentMethod, UserId};

use super::pricing::{self, PricingError};
use crate::models::{Address, FieldError, LineItem, Order};
use crate::stores::{OrderStore, StoreError};

/// Errors that can occur in the order lifecycle.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The address or an item failed validation. Carries every failing
    /// field, not just the first.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// The cart was empty.
    #[error("Order must contain at least one item")]
    EmptyCart,

    /// No order with the given id.
    #[error("Order not found")]
    NotFound,

    /// The requested status is not one of the recognized values.
    #[error("Invalid status. Valid statuses: {}", valid_statuses())]
    InvalidStatus(String),

    /// Cancellation attempted from a terminal state.
    #[error("Order cannot be cancelled in {0} state")]
    TerminalState(OrderStatus),

    /// The pricing calculator rejected the items.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Comma-joined list of the recognized status values, for error messages.
fn valid_statuses() -> String {
    OrderStatus::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checkout payload handed to [`OrderService::create_order`].
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: UserId,
    pub items: Vec<LineItem>,
    pub address: Address,
    pub payment_method: PaymentMethod,
}

/// Order lifecycle manager.
///
/// All mutations go through the injected [`OrderStore`]; no notifications
/// are sent and no inventory is adjusted as part of a transition.
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    /// Serializes fetch-mutate-update sequences so two concurrent
    /// transitions on the same order cannot race last-write-wins.
    transition_guard: Mutex<()>,
}

impl OrderService {
    /// Create a new order service over a store.
    #[must_use]
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self {
            orders,
            transition_guard: Mutex::new(()),
        }
    }

    /// Create an order from a priced cart, a validated address, and a
    /// payment method. The order starts in `pending` with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` for an empty item list and
    /// `OrderError::Validation` with every failing field for a malformed
    /// address or item. Nothing is inserted on failure.
    pub fn create_order(&self, request: CreateOrder) -> Result<Order, OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let mut errors = match request.address.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };
        for (index, item) in request.items.iter().enumerate() {
            if let Err(item_errors) = item.validate(index) {
                errors.extend(item_errors);
            }
        }
        if !errors.is_empty() {
            return Err(OrderError::Validation(errors));
        }

        let pricing = pricing::compute_pricing(&request.items)?;

        let order = Order::new(
            request.customer_id,
            request.items,
            request.address,
            request.payment_method,
            pricing,
        );
        self.orders.insert(order.clone())?;

        tracing::info!(order_id = %order.id, customer_id = %order.customer_id, "order created");
        Ok(order)
    }

    /// Set an order's status to any recognized value.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidStatus` for an unrecognized status
    /// string and `OrderError::NotFound` for an unknown id.
    pub fn update_status(&self, id: OrderId, status: &str) -> Result<Order, OrderError> {
        let status: OrderStatus = status
            .parse()
            .map_err(|_| OrderError::InvalidStatus(status.to_string()))?;

        let _guard = self.lock_transitions();
        let mut order = self.find(id)?;
        order.status = status;
        order.updated_at = Some(Utc::now());
        let order = self.orders.update(order)?;

        tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
        Ok(order)
    }

    /// Cancel an order, stamping the cancellation time and reason.
    ///
    /// Succeeds from any non-terminal state, including `shipped` and
    /// `out_for_delivery`; there is no business restriction on late-stage
    /// cancellation.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::TerminalState` if the order is already
    /// `cancelled` or `delivered`, and `OrderError::NotFound` for an
    /// unknown id.
    pub fn cancel(&self, id: OrderId, reason: Option<String>) -> Result<Order, OrderError> {
        let _guard = self.lock_transitions();
        let mut order = self.find(id)?;

        if order.status.is_terminal() {
            return Err(OrderError::TerminalState(order.status));
        }

        order.status = OrderStatus::Cancelled;
        order.cancelled_at = Some(Utc::now());
        order.cancel_reason = Some(reason.unwrap_or_else(|| "Cancelled by user".to_string()));
        let order = self.orders.update(order)?;

        tracing::info!(order_id = %order.id, "order cancelled");
        Ok(order)
    }

    /// Look up an order by id.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown id.
    pub fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        self.find(id)
    }

    /// A customer's orders, most-recent-first.
    #[must_use]
    pub fn list_for_customer(&self, customer_id: UserId) -> Vec<Order> {
        self.orders.find_by_customer(customer_id)
    }

    /// Every order in the system, most-recent-first.
    #[must_use]
    pub fn list_all(&self) -> Vec<Order> {
        self.orders.all()
    }

    fn find(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders.find_by_id(id).map_err(|e| match e {
            StoreError::NotFound(_) => OrderError::NotFound,
            other => OrderError::Store(other),
        })
    }

    fn lock_transitions(&self) -> std::sync::MutexGuard<'_, ()> {
        self.transition_guard
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::stores::MemoryOrderStore;

    fn service() -> (OrderService, Arc<MemoryOrderStore>) {
        let store = Arc::new(MemoryOrderStore::new());
        (OrderService::new(store.clone()), store)
    }

    fn valid_address() -> Address {
        Address {
            full_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            line1: "12 MG Road, 2nd Cross".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        }
    }

    fn items() -> Vec<LineItem> {
        vec![LineItem {
            product_id: "p-1".to_string(),
            name: "Basmati Rice".to_string(),
            brand: "General Store".to_string(),
            unit_price: dec!(100),
            original_unit_price: dec!(120),
            quantity: 2,
            variant_label: "1 kg".to_string(),
        }]
    }

    fn request() -> CreateOrder {
        CreateOrder {
            customer_id: UserId::generate(),
            items: items(),
            address: valid_address(),
            payment_method: PaymentMethod::Cod,
        }
    }

    #[test]
    fn test_create_order_prices_and_inserts() {
        let (service, store) = service();
        let order = service.create_order(request()).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.pricing.subtotal, dec!(200));
        assert_eq!(order.pricing.savings, dec!(40));
        assert_eq!(order.pricing.delivery_fee, dec!(40));
        assert_eq!(order.pricing.grand_total, dec!(240));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_empty_cart_rejected_nothing_inserted() {
        let (service, store) = service();
        let mut req = request();
        req.items.clear();

        assert!(matches!(
            service.create_order(req),
            Err(OrderError::EmptyCart)
        ));
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_missing_pincode_reported_nothing_inserted() {
        let (service, store) = service();
        let mut req = request();
        req.address.pincode = String::new();

        let Err(OrderError::Validation(errors)) = service.create_order(req) else {
            panic!("expected validation error");
        };
        assert!(errors.iter().any(|e| e.field == "address.pincode"));
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_validation_collects_address_and_item_failures() {
        let (service, _) = service();
        let mut req = request();
        req.address.city = String::new();
        req.items[0].quantity = 0;

        let Err(OrderError::Validation(errors)) = service.create_order(req) else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"address.city"));
        assert!(fields.contains(&"items[0].quantity"));
    }

    #[test]
    fn test_update_status_allows_skipping_forward() {
        let (service, _) = service();
        let order = service.create_order(request()).unwrap();

        // No ordering enforcement: pending straight to delivered succeeds
        let updated = service.update_status(order.id, "delivered").unwrap();
        assert_eq!(updated.status, OrderStatus::Delivered);
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_update_status_rejects_unknown_value() {
        let (service, _) = service();
        let order = service.create_order(request()).unwrap();

        let err = service.update_status(order.id, "refunded").unwrap_err();
        assert!(matches!(err, OrderError::InvalidStatus(_)));
        assert!(err.to_string().contains("out_for_delivery"));
    }

    #[test]
    fn test_update_status_unknown_order() {
        let (service, _) = service();
        assert!(matches!(
            service.update_status(OrderId::generate(), "confirmed"),
            Err(OrderError::NotFound)
        ));
    }

    #[test]
    fn test_cancel_stamps_time_and_default_reason() {
        let (service, _) = service();
        let order = service.create_order(request()).unwrap();

        let cancelled = service.cancel(order.id, None).unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert!(cancelled.cancelled_at.is_some());
        assert_eq!(cancelled.cancel_reason.as_deref(), Some("Cancelled by user"));
    }

    #[test]
    fn test_cancel_keeps_given_reason() {
        let (service, _) = service();
        let order = service.create_order(request()).unwrap();

        let cancelled = service
            .cancel(order.id, Some("Ordered by mistake".to_string()))
            .unwrap();
        assert_eq!(cancelled.cancel_reason.as_deref(), Some("Ordered by mistake"));
    }

    #[test]
    fn test_double_cancel_fails_keeps_original_stamp() {
        let (service, _) = service();
        let order = service.create_order(request()).unwrap();

        let first = service.cancel(order.id, None).unwrap();
        let err = service.cancel(order.id, None).unwrap_err();
        assert!(matches!(
            err,
            OrderError::TerminalState(OrderStatus::Cancelled)
        ));

        // The original cancelledAt is untouched
        let current = service.get(order.id).unwrap();
        assert_eq!(current.cancelled_at, first.cancelled_at);
    }

    #[test]
    fn test_cancel_after_delivery_fails() {
        let (service, _) = service();
        let order = service.create_order(request()).unwrap();
        service.update_status(order.id, "delivered").unwrap();

        let err = service.cancel(order.id, None).unwrap_err();
        assert!(matches!(
            err,
            OrderError::TerminalState(OrderStatus::Delivered)
        ));
        assert_eq!(
            err.to_string(),
            "Order cannot be cancelled in delivered state"
        );
    }

    #[test]
    fn test_cancel_allowed_late_stage() {
        let (service, _) = service();
        let order = service.create_order(request()).unwrap();
        service.update_status(order.id, "out_for_delivery").unwrap();

        assert!(service.cancel(order.id, None).is_ok());
    }

    #[test]
    fn test_customer_listing_most_recent_first() {
        let (service, _) = service();
        let customer = UserId::generate();

        let mut req = request();
        req.customer_id = customer;
        let first = service.create_order(req.clone()).unwrap();
        let second = service.create_order(req).unwrap();

        let mine = service.list_for_customer(customer);
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, second.id);
        assert_eq!(mine[1].id, first.id);
    }
}
