//! Auth failure taxonomy.

use thiserror::Error;

use crate::models::FieldError;
use crate::stores::StoreError;

/// Errors produced by the auth service.
///
/// Display strings are the exact client-facing messages; the HTTP layer
/// maps variants to status codes without rewording them.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more registration fields failed validation.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Email or phone already belongs to an account.
    #[error("Email or phone already registered")]
    Conflict,

    /// Unknown identifier or wrong password. One message for both so the
    /// response does not reveal which accounts exist.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account exists but has been deactivated by an admin.
    #[error("User account is disabled")]
    AccountDisabled,

    /// The bearer token is unknown, revoked, or of the wrong kind.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The phone number is not ten digits.
    #[error("Please provide a valid 10-digit phone number")]
    InvalidPhone,

    /// Password reset requested for a phone with no account.
    #[error("User not found with this phone number")]
    PhoneNotRegistered,

    /// No account with the given id.
    #[error("User not found")]
    UserNotFound,

    /// OTP verification without a preceding forgot-password request.
    #[error("No OTP request found for this phone number")]
    NoOtpRequest,

    /// The OTP outlived its five-minute window.
    #[error("OTP has expired")]
    OtpExpired,

    /// The OTP was guessed wrong three times.
    #[error("Too many attempts. Please request a new OTP")]
    TooManyAttempts,

    /// The submitted code does not match.
    #[error("Invalid OTP")]
    InvalidOtp,

    /// Password reset attempted before the OTP was verified.
    #[error("Please verify OTP first")]
    OtpNotVerified,

    /// New password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// New password is shorter than the minimum.
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    /// Promotion of a user who already holds the admin role.
    #[error("User is already an admin")]
    AlreadyAdmin,

    /// The store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
