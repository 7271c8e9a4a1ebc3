//! Registration, login, tokens, OTP password reset, and user management.
//!
//! Tokens are opaque random strings mapped in memory to their claims;
//! restarting the server signs everyone out, which matches the rest of the
//! in-memory state. Passwords are stored and compared in plaintext on
//! purpose (hashing is out of scope for this backend).
//!
//! OTP challenges live in a `moka` cache with a time-to-live well past the
//! five-minute validity window. The cache TTL is garbage collection only;
//! the exact expiry is checked per entry so an expired code still gets its
//! own error message instead of silently becoming "no OTP request".

mod error;

pub use error::AuthError;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use moka::sync::Cache;
use rand::Rng as _;
use serde::Serialize;

use general_store_core::{Email, Phone, UserId, UserRole};

use crate::models::{FieldError, User, UserView};
use crate::stores::{StoreError, UserStore};

/// Minimum password length, applied at registration and reset.
const MIN_PASSWORD_LEN: usize = 6;

/// How long an OTP stays valid after issue, in minutes.
const OTP_VALIDITY_MINUTES: i64 = 5;

/// Wrong guesses allowed before the challenge is burned.
const MAX_OTP_ATTEMPTS: u32 = 3;

/// What a bearer token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims behind an issued token.
#[derive(Debug, Clone, Copy)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub role: UserRole,
    pub kind: TokenKind,
}

/// The flat payload returned by register and login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user_id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub role: UserRole,
    pub access_token: String,
    pub refresh_token: String,
}

/// Payload returned by the refresh-token exchange.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedToken {
    pub access_token: String,
}

/// The profile shape returned to the token's owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub role: UserRole,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
        }
    }
}

/// Registration input, already shaped by the HTTP layer.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub phone: String,
    /// Synthesized from the phone digits when absent.
    pub email: Option<String>,
    pub password: String,
}

/// An in-flight password-reset challenge, keyed by phone digits.
#[derive(Debug, Clone)]
struct OtpChallenge {
    code: String,
    expires_at: DateTime<Utc>,
    attempts: u32,
    verified: bool,
}

/// Auth and user-management service.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: RwLock<HashMap<String, TokenClaims>>,
    otps: Cache<String, Arc<Mutex<OtpChallenge>>>,
}

impl AuthService {
    /// Create an auth service over a user store.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            tokens: RwLock::new(HashMap::new()),
            // TTL is only cleanup; validity is checked per entry
            otps: Cache::builder()
                .time_to_live(Duration::from_secs(30 * 60))
                .build(),
        }
    }

    /// Register a new customer account and sign it in.
    ///
    /// The role is always `customer`; admin accounts are created by
    /// promotion only, never at registration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` with every failing field, or
    /// `AuthError::Conflict` if the email or phone is taken.
    pub fn register(&self, request: RegisterUser) -> Result<AuthSession, AuthError> {
        let mut errors = Vec::new();

        if request.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        let phone = match Phone::parse(&request.phone) {
            Ok(phone) => Some(phone),
            Err(e) => {
                errors.push(FieldError::new("phone", e.to_string()));
                None
            }
        };
        if request.password.len() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        let email = match (&request.email, &phone) {
            (Some(raw), _) => match Email::parse(raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.push(FieldError::new("email", e.to_string()));
                    None
                }
            },
            (None, Some(phone)) => {
                // No email supplied: synthesize one from the digits so the
                // uniqueness rules still hold
                match Email::parse(&format!("{phone}@general-store.local")) {
                    Ok(email) => Some(email),
                    Err(e) => {
                        errors.push(FieldError::new("email", e.to_string()));
                        None
                    }
                }
            }
            (None, None) => None,
        };

        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }
        let (Some(phone), Some(email)) = (phone, email) else {
            return Err(AuthError::Validation(vec![FieldError::new(
                "phone",
                "Phone number is required",
            )]));
        };

        let user = User::new(
            request.name.trim().to_string(),
            email,
            phone,
            request.password,
            UserRole::Customer,
        );
        self.users.insert(user.clone()).map_err(|e| match e {
            StoreError::Conflict(_) => AuthError::Conflict,
            other => AuthError::Store(other),
        })?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(self.start_session(&user))
    }

    /// Sign in with an email or a phone number plus a password.
    ///
    /// The identifier is an email if it contains `@`, a phone otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown identifier or
    /// wrong password, `AuthError::AccountDisabled` for a deactivated
    /// account.
    pub fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, AuthError> {
        let user = if identifier.contains('@') {
            let email = Email::parse(identifier).map_err(|_| AuthError::InvalidCredentials)?;
            self.users.find_by_email(&email)
        } else {
            let phone = Phone::parse(identifier).map_err(|_| AuthError::InvalidCredentials)?;
            self.users.find_by_phone(&phone)
        }
        .ok_or(AuthError::InvalidCredentials)?;

        if user.password != password {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(self.start_session(&user))
    }

    /// Revoke a presented token. Always succeeds; logout with a stale or
    /// absent token is not an error.
    pub fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            self.write_tokens().remove(token);
        }
    }

    /// Exchange a valid refresh token for a fresh access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is unknown or is not
    /// a refresh token, `AuthError::AccountDisabled` if the account was
    /// deactivated since issue.
    pub fn refresh(&self, refresh_token: &str) -> Result<RefreshedToken, AuthError> {
        let claims = self
            .read_tokens()
            .get(refresh_token)
            .copied()
            .ok_or(AuthError::InvalidToken)?;
        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::InvalidToken);
        }

        let user = self.find_user(claims.user_id)?;
        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        Ok(RefreshedToken {
            access_token: self.mint_token(&user, TokenKind::Access),
        })
    }

    /// Resolve an access token to its user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for an unknown, revoked, or
    /// refresh-kind token, `AuthError::AccountDisabled` for a deactivated
    /// account.
    pub fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self
            .read_tokens()
            .get(token)
            .copied()
            .ok_or(AuthError::InvalidToken)?;
        if claims.kind != TokenKind::Access {
            return Err(AuthError::InvalidToken);
        }

        let user = self.find_user(claims.user_id)?;
        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }
        Ok(user)
    }

    /// The profile for a signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account no longer exists.
    pub fn profile(&self, user_id: UserId) -> Result<Profile, AuthError> {
        Ok(Profile::from(&self.find_user(user_id)?))
    }

    /// Begin a password reset by issuing a six-digit OTP for the phone.
    ///
    /// The code is written to the log in lieu of an SMS gateway.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPhone` for a malformed number and
    /// `AuthError::PhoneNotRegistered` if no account matches.
    pub fn forgot_password(&self, phone_number: &str) -> Result<Phone, AuthError> {
        let phone = Phone::parse(phone_number).map_err(|_| AuthError::InvalidPhone)?;
        if self.users.find_by_phone(&phone).is_none() {
            return Err(AuthError::PhoneNotRegistered);
        }

        let code = format!("{}", rand::rng().random_range(100_000..=999_999));
        tracing::info!(phone = %phone, otp = %code, "password reset OTP issued");

        self.otps.insert(
            phone.to_string(),
            Arc::new(Mutex::new(OtpChallenge {
                code,
                expires_at: Utc::now() + chrono::Duration::minutes(OTP_VALIDITY_MINUTES),
                attempts: 0,
                verified: false,
            })),
        );
        Ok(phone)
    }

    /// Check a submitted OTP against the outstanding challenge.
    ///
    /// A verified challenge stays in the store so the follow-up password
    /// reset can consume it.
    ///
    /// # Errors
    ///
    /// Distinguishes a missing challenge, an expired code, an exhausted
    /// attempt budget, and a plain wrong code; the latter burns an attempt.
    pub fn verify_otp(&self, phone_number: &str, otp: &str) -> Result<(), AuthError> {
        let phone = Phone::parse(phone_number).map_err(|_| AuthError::InvalidPhone)?;
        let key = phone.to_string();
        let entry = self.otps.get(&key).ok_or(AuthError::NoOtpRequest)?;
        let mut challenge = entry
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if Utc::now() > challenge.expires_at {
            drop(challenge);
            self.otps.invalidate(&key);
            return Err(AuthError::OtpExpired);
        }
        if challenge.attempts >= MAX_OTP_ATTEMPTS {
            drop(challenge);
            self.otps.invalidate(&key);
            return Err(AuthError::TooManyAttempts);
        }
        if challenge.code != otp {
            challenge.attempts += 1;
            return Err(AuthError::InvalidOtp);
        }

        challenge.verified = true;
        Ok(())
    }

    /// Set a new password after a verified OTP, consuming the challenge.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` or `AuthError::PasswordTooShort`
    /// for a bad password pair, `AuthError::OtpNotVerified` without a
    /// verified challenge, `AuthError::UserNotFound` if the account
    /// vanished.
    pub fn reset_password(
        &self,
        phone_number: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        if new_password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }

        let phone = Phone::parse(phone_number).map_err(|_| AuthError::InvalidPhone)?;
        let key = phone.to_string();
        let verified = self.otps.get(&key).is_some_and(|entry| {
            entry
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .verified
        });
        if !verified {
            return Err(AuthError::OtpNotVerified);
        }

        let mut user = self
            .users
            .find_by_phone(&phone)
            .ok_or(AuthError::UserNotFound)?;
        user.password = new_password.to_string();
        self.users.update(user)?;
        self.otps.invalidate(&key);

        tracing::info!(phone = %phone, "password reset completed");
        Ok(())
    }

    /// Every user, as client-safe views.
    #[must_use]
    pub fn list_users(&self) -> Vec<UserView> {
        self.users.all().iter().map(UserView::from).collect()
    }

    /// Flip a user's active flag.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` for an unknown id.
    pub fn toggle_active(&self, id: UserId) -> Result<UserView, AuthError> {
        let mut user = self.find_user(id)?;
        user.is_active = !user.is_active;
        let user = self.users.update(user)?;
        tracing::info!(user_id = %user.id, is_active = user.is_active, "user active flag toggled");
        Ok(UserView::from(&user))
    }

    /// Grant a user the admin role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyAdmin` if the user already holds it and
    /// `AuthError::UserNotFound` for an unknown id.
    pub fn promote(&self, id: UserId) -> Result<UserView, AuthError> {
        let mut user = self.find_user(id)?;
        if user.role.is_admin() {
            return Err(AuthError::AlreadyAdmin);
        }
        user.role = UserRole::Admin;
        let user = self.users.update(user)?;
        tracing::info!(user_id = %user.id, "user promoted to admin");
        Ok(UserView::from(&user))
    }

    /// Insert a pre-built admin account if the phone is not yet taken.
    /// Used by startup seeding; a second call is a no-op.
    pub fn seed_admin(&self, name: &str, email: Email, phone: Phone, password: &str) -> bool {
        if self.users.find_by_phone(&phone).is_some() {
            return false;
        }
        let user = User::new(
            name.to_string(),
            email,
            phone,
            password.to_string(),
            UserRole::Admin,
        );
        let seeded = self.users.insert(user).is_ok();
        if seeded {
            tracing::info!("admin account seeded");
        }
        seeded
    }

    fn start_session(&self, user: &User) -> AuthSession {
        AuthSession {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            access_token: self.mint_token(user, TokenKind::Access),
            refresh_token: self.mint_token(user, TokenKind::Refresh),
        }
    }

    fn mint_token(&self, user: &User, kind: TokenKind) -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);
        self.write_tokens().insert(
            token.clone(),
            TokenClaims {
                user_id: user.id,
                role: user.role,
                kind,
            },
        );
        token
    }

    fn find_user(&self, id: UserId) -> Result<User, AuthError> {
        self.users.find_by_id(id).map_err(|e| match e {
            StoreError::NotFound(_) => AuthError::UserNotFound,
            other => AuthError::Store(other),
        })
    }

    fn read_tokens(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, TokenClaims>> {
        self.tokens
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_tokens(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, TokenClaims>> {
        self.tokens
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[cfg(test)]
    fn force_expire_otp(&self, phone: &str) {
        if let Some(entry) = self.otps.get(phone) {
            entry
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }

    #[cfg(test)]
    fn issued_otp(&self, phone: &str) -> Option<String> {
        self.otps.get(phone).map(|entry| {
            entry
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .code
                .clone()
        })
    }
}
