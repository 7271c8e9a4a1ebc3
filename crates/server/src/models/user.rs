//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use general_store_core::{Email, Phone, UserId, UserRole};

/// A registered user (domain type).
///
/// Holds the plaintext password, so it is deliberately not serializable;
/// every wire shape goes through [`UserView`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    /// Plaintext on purpose: password hashing is out of scope for this
    /// backend and the store resets on every restart.
    pub password: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new active customer account.
    #[must_use]
    pub fn new(name: String, email: Email, phone: Phone, password: String, role: UserRole) -> Self {
        Self {
            id: UserId::generate(),
            name,
            email,
            phone,
            password,
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// The client-safe projection of a [`User`]. Never carries the password.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}
