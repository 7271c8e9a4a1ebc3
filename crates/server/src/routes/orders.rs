//! Order routes: checkout, tracking, and cancellation.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use general_store_core::{OrderId, PaymentMethod, UserId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Address, LineItem, Order};
use crate::routes::ApiResponse;
use crate::services::orders::CreateOrder;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: Option<String>,
    pub items: Vec<LineItem>,
    pub address: Address,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Place an order.
///
/// POST /api/orders
///
/// The customer id in the body is trusted as-is; checkout has no
/// credential requirement.
///
/// # Errors
///
/// Returns 400 for an empty cart or failed validation.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Order>>)> {
    let customer_id: UserId = request
        .user_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("User ID is required".to_string()))?
        .parse()
        .map_err(|_| AppError::BadRequest("User ID is required".to_string()))?;

    let order = state.orders().create_order(CreateOrder {
        customer_id,
        items: request.items,
        address: request.address,
        payment_method: request.payment_method,
    })?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Order placed successfully", order),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrdersQuery {
    pub user_id: Option<String>,
}

/// A customer's orders, most-recent-first.
///
/// GET /api/orders/customer/orders?userId=
///
/// # Errors
///
/// Returns 400 when the user id is missing or malformed.
pub async fn customer_orders(
    State(state): State<AppState>,
    Query(query): Query<CustomerOrdersQuery>,
) -> Result<Json<ApiResponse<Vec<Order>>>> {
    let customer_id: UserId = query
        .user_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("User ID is required".to_string()))?
        .parse()
        .map_err(|_| AppError::BadRequest("User ID is required".to_string()))?;

    Ok(ApiResponse::data(state.orders().list_for_customer(customer_id)))
}

/// Every order in the system.
///
/// GET /api/orders
///
/// # Errors
///
/// Returns 401 without a token, 403 without the admin role.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<Vec<Order>>>> {
    Ok(ApiResponse::data(state.orders().list_all()))
}

/// Order detail.
///
/// GET /api/orders/{orderId}
///
/// # Errors
///
/// Returns 404 for an unknown order.
pub async fn show(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<Order>>> {
    let id = parse_order_id(&order_id)?;
    Ok(ApiResponse::data(state.orders().get(id)?))
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// Cancel an order.
///
/// POST /api/orders/{orderId}/cancel
///
/// # Errors
///
/// Returns 400 when the order is already delivered or cancelled, 404 for
/// an unknown order.
pub async fn cancel(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    request: Option<Json<CancelRequest>>,
) -> Result<Json<ApiResponse<Order>>> {
    let id = parse_order_id(&order_id)?;
    let reason = request.and_then(|Json(request)| request.reason);
    let order = state.orders().cancel(id, reason)?;
    Ok(ApiResponse::with_message("Order cancelled successfully", order))
}

fn parse_order_id(raw: &str) -> Result<OrderId> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Order not found".to_string()))
}
