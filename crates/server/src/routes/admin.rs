//! Admin console routes.
//!
//! Every handler requires a bearer token with the admin role; the
//! extractor rejects anything else before the handler body runs.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use general_store_core::{OrderId, ProductId, UserId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Order, Product, UserView, WeightVariant};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Every order in the system, most-recent-first.
///
/// GET /api/admin/orders
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<ApiResponse<Vec<Order>>> {
    ApiResponse::data(state.orders().list_all())
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Set an order's status.
///
/// PUT /api/admin/orders/{id}/status
///
/// # Errors
///
/// Returns 400 for an unrecognized status, 404 for an unknown order.
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Order>>> {
    let id: OrderId = id
        .parse()
        .map_err(|_| AppError::NotFound("Order not found".to_string()))?;
    let order = state.orders().update_status(id, &request.status)?;
    Ok(ApiResponse::with_message(
        "Order status updated successfully",
        order,
    ))
}

/// Every user account.
///
/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<ApiResponse<Vec<UserView>>> {
    ApiResponse::data(state.auth().list_users())
}

/// Flip a user's active flag.
///
/// PUT /api/admin/users/{id}/toggle-status
///
/// # Errors
///
/// Returns 404 for an unknown user.
pub async fn toggle_user_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserView>>> {
    let id = parse_user_id(&id)?;
    let user = state.auth().toggle_active(id)?;
    Ok(ApiResponse::with_message("User status updated", user))
}

/// Grant a user the admin role.
///
/// PUT /api/admin/users/{id}/promote
///
/// # Errors
///
/// Returns 400 if the user already holds it, 404 for an unknown user.
pub async fn promote_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserView>>> {
    let id = parse_user_id(&id)?;
    let user = state.auth().promote(id)?;
    Ok(ApiResponse::with_message("User promoted to admin", user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRequest {
    pub label: String,
    pub value: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
}

fn default_in_stock() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub variants: Vec<VariantRequest>,
}

impl ProductRequest {
    /// Materialize a product under the given id, deriving base pricing
    /// from the first variant.
    ///
    /// # Errors
    ///
    /// Returns 400 when no variants are given.
    fn into_product(self, id: ProductId) -> Result<Product> {
        if self.variants.is_empty() {
            return Err(AppError::BadRequest(
                "Product must have at least one variant".to_string(),
            ));
        }

        let mut product = Product {
            id,
            name: self.name,
            brand: self.brand,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            in_stock: self.in_stock,
            variants: self
                .variants
                .into_iter()
                .map(|v| WeightVariant::build(v.label, v.value, v.price, v.original_price))
                .collect(),
            price: Decimal::ZERO,
            original_price: Decimal::ZERO,
            discount_percent: 0,
            created_at: Utc::now(),
        };
        product.sync_base_pricing();
        Ok(product)
    }
}

/// Create a catalog product.
///
/// POST /api/admin/products
///
/// # Errors
///
/// Returns 400 for a product without variants.
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>)> {
    let product = request.into_product(ProductId::generate())?;
    state.catalog().insert(product.clone())?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Product created successfully", product),
    ))
}

/// Replace a catalog product.
///
/// PUT /api/admin/products/{id}
///
/// # Errors
///
/// Returns 400 for a product without variants, 404 for an unknown id.
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<ApiResponse<Product>>> {
    let id = parse_product_id(&id)?;
    // Keep the original creation time across updates
    let existing = state
        .catalog()
        .find_by_id(id)
        .map_err(|_| AppError::NotFound("Product not found".to_string()))?;

    let mut product = request.into_product(id)?;
    product.created_at = existing.created_at;
    let product = state
        .catalog()
        .update(product)
        .map_err(|_| AppError::NotFound("Product not found".to_string()))?;
    Ok(ApiResponse::with_message("Product updated successfully", product))
}

/// Delete a catalog product.
///
/// DELETE /api/admin/products/{id}
///
/// # Errors
///
/// Returns 404 for an unknown id.
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let id = parse_product_id(&id)?;
    let removed = state
        .catalog()
        .delete(id)
        .map_err(|_| AppError::NotFound("Product not found".to_string()))?;
    Ok(ApiResponse::with_message("Product deleted successfully", removed))
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    raw.parse()
        .map_err(|_| AppError::NotFound("User not found".to_string()))
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Product not found".to_string()))
}
