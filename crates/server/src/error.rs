//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`; every failure is rendered as the standard
//! `{success: false, message, errors?}` envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::FieldError;
use crate::services::{AuthError, OrderError};
use crate::stores::StoreError;

/// Application-level error type for the backend.
#[derive(Debug, Error)]
pub enum AppError {
    /// Order lifecycle operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Auth operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Store operation failed outside a service.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from the client.
    #[error("{0}")]
    BadRequest(String),

    /// Bad request with per-field details.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Request lacks valid authentication.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Order(err) => match err {
                OrderError::Validation(_)
                | OrderError::EmptyCart
                | OrderError::InvalidStatus(_)
                | OrderError::TerminalState(_)
                | OrderError::Pricing(_) => StatusCode::BAD_REQUEST,
                OrderError::NotFound => StatusCode::NOT_FOUND,
                OrderError::Store(err) => store_status(err),
            },
            Self::Auth(err) => match err {
                AuthError::Validation(_)
                | AuthError::InvalidPhone
                | AuthError::NoOtpRequest
                | AuthError::OtpExpired
                | AuthError::TooManyAttempts
                | AuthError::InvalidOtp
                | AuthError::OtpNotVerified
                | AuthError::PasswordMismatch
                | AuthError::PasswordTooShort
                | AuthError::AlreadyAdmin => StatusCode::BAD_REQUEST,
                AuthError::Conflict => StatusCode::CONFLICT,
                AuthError::InvalidCredentials | AuthError::InvalidToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::AccountDisabled => StatusCode::FORBIDDEN,
                AuthError::PhoneNotRegistered | AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::Store(err) => store_status(err),
            },
            Self::Store(err) => store_status(err),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The client-facing message. Service errors carry their own exact
    /// wording; internal details are never exposed.
    fn message(&self) -> String {
        match self {
            Self::Order(err) => err.to_string(),
            Self::Auth(err) => err.to_string(),
            Self::Store(err) => err.to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Order(OrderError::Validation(errors))
            | Self::Auth(AuthError::Validation(errors))
            | Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Conflict(_) => StatusCode::CONFLICT,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Internal(_)) || self.status().is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let mut body = json!({
            "success": false,
            "message": self.message(),
        });
        if let Some(errors) = self.field_errors()
            && let Ok(errors) = serde_json::to_value(errors)
        {
            body["errors"] = errors;
        }

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
