//! User store.

use std::sync::RwLock;

use general_store_core::{Email, Phone, UserId};

use super::StoreError;
use crate::models::User;

/// Storage interface for user accounts.
///
/// Email and phone are each unique across the store.
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email or phone is taken.
    fn insert(&self, user: User) -> Result<(), StoreError>;

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn find_by_id(&self, id: UserId) -> Result<User, StoreError>;

    /// Look up a user by email.
    fn find_by_email(&self, email: &Email) -> Option<User>;

    /// Look up a user by phone.
    fn find_by_phone(&self, phone: &Phone) -> Option<User>;

    /// Every user, in insertion order.
    fn all(&self) -> Vec<User>;

    /// Replace a user in place, identity preserved by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    fn update(&self, user: User) -> Result<User, StoreError>;
}

/// In-memory [`UserStore`] over a locked vector.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl UserStore for MemoryUserStore {
    fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.write();
        if users
            .iter()
            .any(|u| u.email == user.email || u.phone == user.phone)
        {
            return Err(StoreError::Conflict(
                "Email or phone already registered".to_string(),
            ));
        }
        users.push(user);
        Ok(())
    }

    fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        self.read()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("User"))
    }

    fn find_by_email(&self, email: &Email) -> Option<User> {
        self.read().iter().find(|u| &u.email == email).cloned()
    }

    fn find_by_phone(&self, phone: &Phone) -> Option<User> {
        self.read().iter().find(|u| &u.phone == phone).cloned()
    }

    fn all(&self) -> Vec<User> {
        self.read().clone()
    }

    fn update(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.write();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::NotFound("User"))?;
        *slot = user.clone();
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use general_store_core::UserRole;

    use super::*;

    fn user(email: &str, phone: &str) -> User {
        User::new(
            "Test User".to_string(),
            Email::parse(email).unwrap(),
            Phone::parse(phone).unwrap(),
            "password1".to_string(),
            UserRole::Customer,
        )
    }

    #[test]
    fn test_insert_and_lookups() {
        let store = MemoryUserStore::new();
        let u = user("asha@example.com", "9876543210");
        let id = u.id;
        store.insert(u).unwrap();

        assert_eq!(store.find_by_id(id).unwrap().id, id);
        assert!(
            store
                .find_by_email(&Email::parse("asha@example.com").unwrap())
                .is_some()
        );
        assert!(
            store
                .find_by_phone(&Phone::parse("9876543210").unwrap())
                .is_some()
        );
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.insert(user("asha@example.com", "9876543210")).unwrap();
        assert!(matches!(
            store.insert(user("asha@example.com", "9000000000")),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_duplicate_phone_conflicts() {
        let store = MemoryUserStore::new();
        store.insert(user("asha@example.com", "9876543210")).unwrap();
        assert!(matches!(
            store.insert(user("ravi@example.com", "9876543210")),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let store = MemoryUserStore::new();
        let mut u = user("asha@example.com", "9876543210");
        store.insert(u.clone()).unwrap();

        u.is_active = false;
        store.update(u.clone()).unwrap();
        assert!(!store.find_by_id(u.id).unwrap().is_active);
    }

    #[test]
    fn test_update_unknown_user() {
        let store = MemoryUserStore::new();
        assert!(matches!(
            store.update(user("asha@example.com", "9876543210")),
            Err(StoreError::NotFound("User"))
        ));
    }
}
