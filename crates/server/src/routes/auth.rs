//! Auth routes: registration, login, tokens, and password reset.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, request::Parts},
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::middleware::auth::bearer_token;
use crate::routes::ApiResponse;
use crate::services::auth::{AuthSession, Profile, RefreshedToken, RegisterUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: String,
}

/// Create a customer account and sign it in.
///
/// POST /api/auth/register
///
/// # Errors
///
/// Returns 400 for invalid fields, 409 for a taken email or phone.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSession>>)> {
    let session = state.auth().register(RegisterUser {
        name: request.name,
        phone: request.phone,
        email: request.email,
        password: request.password,
    })?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("User registered successfully", session),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Accepted as an alias for `phone`.
    pub phone_number: Option<String>,
    pub password: String,
}

/// Sign in with an email or a phone number.
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns 401 for bad credentials, 403 for a disabled account.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthSession>>> {
    let identifier = request
        .email
        .as_deref()
        .filter(|email| email.contains('@'))
        .or(request.phone.as_deref())
        .or(request.phone_number.as_deref())
        .filter(|identifier| !identifier.trim().is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("Email or phone and password are required".to_string())
        })?;

    let session = state.auth().login(identifier, &request.password)?;
    Ok(ApiResponse::with_message("Login successful", session))
}

/// Revoke the presented token, if any.
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, parts: Parts) -> Json<ApiResponse<()>> {
    state.auth().logout(bearer_token(&parts));
    ApiResponse::message("Logout successful")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Exchange a refresh token for a fresh access token.
///
/// POST /api/auth/refresh-token
///
/// # Errors
///
/// Returns 401 for an unknown or non-refresh token.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshedToken>>> {
    let refreshed = state.auth().refresh(&request.refresh_token)?;
    Ok(ApiResponse::data(refreshed))
}

/// The signed-in user's profile.
///
/// GET /api/auth/profile
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ApiResponse<Profile>>> {
    Ok(ApiResponse::data(state.auth().profile(user.id)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub phone_number: String,
}

/// Issue a password-reset OTP for a phone number.
///
/// POST /api/auth/forgot-password
///
/// # Errors
///
/// Returns 400 for a malformed number, 404 for an unknown one.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let phone = state.auth().forgot_password(&request.phone_number)?;
    Ok(ApiResponse::with_message(
        format!("OTP sent to +91 {phone}"),
        serde_json::json!({ "phoneNumber": phone }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub otp: String,
}

/// Check an OTP against the outstanding challenge.
///
/// POST /api/auth/verify-otp
///
/// # Errors
///
/// Returns 400 with a message distinguishing a missing challenge, an
/// expired code, an exhausted attempt budget, and a wrong code.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .auth()
        .verify_otp(&request.phone_number, &request.otp)?;
    Ok(ApiResponse::message("OTP verified successfully"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub phone_number: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Set a new password after a verified OTP.
///
/// POST /api/auth/reset-password
///
/// # Errors
///
/// Returns 400 for a bad password pair or an unverified OTP.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>> {
    state.auth().reset_password(
        &request.phone_number,
        &request.new_password,
        &request.confirm_password,
    )?;
    Ok(ApiResponse::message("Password reset successfully"))
}
