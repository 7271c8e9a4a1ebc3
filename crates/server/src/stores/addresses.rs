//! Address book store.

use std::sync::RwLock;

use general_store_core::AddressId;

use super::StoreError;
use crate::models::SavedAddress;

/// Storage interface for the address book.
///
/// The book is a single shared list, matching the checkout flow that
/// auto-saves addresses without credentials. At most one entry carries the
/// default flag: inserting or updating an entry with `is_default` set clears
/// the flag on every other entry inside the same lock.
pub trait AddressStore: Send + Sync {
    /// Every saved address, in insertion order.
    fn all(&self) -> Vec<SavedAddress>;

    /// Look up an entry by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn find_by_id(&self, id: AddressId) -> Result<SavedAddress, StoreError>;

    /// Insert a new entry, clearing sibling defaults if it is the default.
    fn insert(&self, address: SavedAddress);

    /// Replace an entry in place, clearing sibling defaults if it is the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn update(&self, address: SavedAddress) -> Result<SavedAddress, StoreError>;

    /// Remove an entry, returning it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn delete(&self, id: AddressId) -> Result<SavedAddress, StoreError>;
}

/// In-memory [`AddressStore`] over a locked vector.
#[derive(Debug, Default)]
pub struct MemoryAddressStore {
    addresses: RwLock<Vec<SavedAddress>>,
}

impl MemoryAddressStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<SavedAddress>> {
        self.addresses.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<SavedAddress>> {
        self.addresses.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl AddressStore for MemoryAddressStore {
    fn all(&self) -> Vec<SavedAddress> {
        self.read().clone()
    }

    fn find_by_id(&self, id: AddressId) -> Result<SavedAddress, StoreError> {
        self.read()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("Address"))
    }

    fn insert(&self, address: SavedAddress) {
        let mut addresses = self.write();
        if address.is_default {
            for existing in addresses.iter_mut() {
                existing.is_default = false;
            }
        }
        addresses.push(address);
    }

    fn update(&self, address: SavedAddress) -> Result<SavedAddress, StoreError> {
        let mut addresses = self.write();
        if !addresses.iter().any(|a| a.id == address.id) {
            return Err(StoreError::NotFound("Address"));
        }
        if address.is_default {
            for existing in addresses.iter_mut() {
                existing.is_default = false;
            }
        }
        for slot in addresses.iter_mut() {
            if slot.id == address.id {
                *slot = address.clone();
                break;
            }
        }
        Ok(address)
    }

    fn delete(&self, id: AddressId) -> Result<SavedAddress, StoreError> {
        let mut addresses = self.write();
        let index = addresses
            .iter()
            .position(|a| a.id == id)
            .ok_or(StoreError::NotFound("Address"))?;
        Ok(addresses.remove(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(label: &str, is_default: bool) -> SavedAddress {
        SavedAddress {
            id: AddressId::generate(),
            label: label.to_string(),
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            line1: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            is_default,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_insert_default_clears_siblings() {
        let store = MemoryAddressStore::new();
        store.insert(entry("Home", true));
        store.insert(entry("Office", true));

        let defaults: Vec<_> = store.all().into_iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].label, "Office");
    }

    #[test]
    fn test_update_default_clears_siblings() {
        let store = MemoryAddressStore::new();
        let home = entry("Home", true);
        let mut office = entry("Office", false);
        store.insert(home.clone());
        store.insert(office.clone());

        office.is_default = true;
        store.update(office).unwrap();

        let all = store.all();
        assert!(!all.iter().find(|a| a.id == home.id).unwrap().is_default);
    }

    #[test]
    fn test_non_default_insert_keeps_existing_default() {
        let store = MemoryAddressStore::new();
        let home = entry("Home", true);
        store.insert(home.clone());
        store.insert(entry("Office", false));

        assert!(store.find_by_id(home.id).unwrap().is_default);
    }

    #[test]
    fn test_delete_returns_entry() {
        let store = MemoryAddressStore::new();
        let home = entry("Home", false);
        store.insert(home.clone());

        let removed = store.delete(home.id).unwrap();
        assert_eq!(removed.id, home.id);
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_unknown_id_errors() {
        let store = MemoryAddressStore::new();
        assert!(matches!(
            store.delete(AddressId::generate()),
            Err(StoreError::NotFound("Address"))
        ));
        assert!(matches!(
            store.update(entry("Home", false)),
            Err(StoreError::NotFound("Address"))
        ));
    }
}
