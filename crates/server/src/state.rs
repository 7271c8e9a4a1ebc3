//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{AuthService, OrderService};
use crate::stores::{
    AddressStore, CatalogStore, MemoryAddressStore, MemoryCatalogStore, MemoryOrderStore,
    MemoryUserStore,
};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; all stores are in-memory and reset on
/// restart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Arc<MemoryCatalogStore>,
    addresses: Arc<MemoryAddressStore>,
    orders: OrderService,
    auth: AuthService,
}

impl AppState {
    /// Create a new application state with empty stores.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let catalog = Arc::new(MemoryCatalogStore::new());
        let addresses = Arc::new(MemoryAddressStore::new());
        let order_store = Arc::new(MemoryOrderStore::new());
        let user_store = Arc::new(MemoryUserStore::new());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                addresses,
                orders: OrderService::new(order_store),
                auth: AuthService::new(user_store),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog store.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.inner.catalog.as_ref()
    }

    /// Get a reference to the address book store.
    #[must_use]
    pub fn addresses(&self) -> &dyn AddressStore {
        self.inner.addresses.as_ref()
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Get a reference to the auth service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }
}

#[cfg(test)]
impl AppState {
    /// State with default configuration, for handler tests.
    #[must_use]
    pub fn for_tests() -> Self {
        Self::new(ServerConfig::default())
    }
}
