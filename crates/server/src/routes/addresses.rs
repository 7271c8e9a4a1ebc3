//! Address book routes.
//!
//! The book is a single shared list with no credential requirement,
//! matching the checkout flow that auto-saves addresses.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use general_store_core::AddressId;

use crate::error::{AppError, Result};
use crate::models::SavedAddress;
use crate::routes::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[serde(default)]
    pub label: String,
    pub name: String,
    pub phone: String,
    pub line1: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Save a new address.
///
/// POST /api/addresses
///
/// # Errors
///
/// Returns 400 with per-field errors for invalid input.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<AddressRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SavedAddress>>)> {
    let entry = SavedAddress {
        id: AddressId::generate(),
        label: request.label,
        name: request.name,
        phone: request.phone,
        line1: request.line1,
        city: request.city,
        state: request.state,
        pincode: request.pincode,
        is_default: request.is_default,
        created_at: Utc::now(),
        updated_at: None,
    };
    entry.validate().map_err(AppError::Validation)?;

    state.addresses().insert(entry.clone());
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Address saved successfully", entry),
    ))
}

/// Every saved address.
///
/// GET /api/addresses
pub async fn index(State(state): State<AppState>) -> Json<ApiResponse<Vec<SavedAddress>>> {
    ApiResponse::data(state.addresses().all())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressUpdateRequest {
    pub label: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub is_default: Option<bool>,
}

/// Update an address, patching only the fields present in the body.
///
/// PUT /api/addresses/{addressId}
///
/// # Errors
///
/// Returns 400 for invalid input, 404 for an unknown id.
pub async fn update(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
    Json(request): Json<AddressUpdateRequest>,
) -> Result<Json<ApiResponse<SavedAddress>>> {
    let id = parse_address_id(&address_id)?;
    let existing = state
        .addresses()
        .find_by_id(id)
        .map_err(|_| AppError::NotFound("Address not found".to_string()))?;

    let entry = SavedAddress {
        id,
        label: request.label.unwrap_or(existing.label),
        name: request.name.unwrap_or(existing.name),
        phone: request.phone.unwrap_or(existing.phone),
        line1: request.line1.unwrap_or(existing.line1),
        city: request.city.unwrap_or(existing.city),
        state: request.state.unwrap_or(existing.state),
        pincode: request.pincode.unwrap_or(existing.pincode),
        is_default: request.is_default.unwrap_or(existing.is_default),
        created_at: existing.created_at,
        updated_at: Some(Utc::now()),
    };
    entry.validate().map_err(AppError::Validation)?;

    let entry = state
        .addresses()
        .update(entry)
        .map_err(|_| AppError::NotFound("Address not found".to_string()))?;
    Ok(ApiResponse::with_message("Address updated successfully", entry))
}

/// Delete an address.
///
/// DELETE /api/addresses/{addressId}
///
/// # Errors
///
/// Returns 404 for an unknown id.
pub async fn remove(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
) -> Result<Json<ApiResponse<SavedAddress>>> {
    let id = parse_address_id(&address_id)?;
    let removed = state
        .addresses()
        .delete(id)
        .map_err(|_| AppError::NotFound("Address not found".to_string()))?;
    Ok(ApiResponse::with_message("Address deleted successfully", removed))
}

fn parse_address_id(raw: &str) -> Result<AddressId> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Address not found".to_string()))
}
