//! HTTP route handlers for the General Store backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//! GET  /                                - API index
//!
//! # Products (public)
//! GET  /api/products                    - Product listing (?category=&search=&limit=)
//! GET  /api/products/categories         - Category list
//! GET  /api/products/category/{category} - Products in a category
//! GET  /api/products/suggestions        - Typeahead suggestions (?search=&limit=)
//! GET  /api/products/{id}               - Product detail
//!
//! # Auth
//! POST /api/auth/register               - Create an account
//! POST /api/auth/login                  - Sign in (email or phone)
//! POST /api/auth/logout                 - Revoke the presented token
//! POST /api/auth/refresh-token          - Exchange a refresh token
//! GET  /api/auth/profile                - Current user (requires auth)
//! POST /api/auth/forgot-password        - Request a password-reset OTP
//! POST /api/auth/verify-otp             - Verify the OTP
//! POST /api/auth/reset-password         - Set a new password
//!
//! # Orders
//! POST /api/orders                      - Place an order
//! GET  /api/orders                      - Every order (requires admin)
//! GET  /api/orders/customer/orders      - A customer's orders (?userId=)
//! GET  /api/orders/{orderId}            - Order detail
//! POST /api/orders/{orderId}/cancel     - Cancel an order
//!
//! # Addresses
//! POST /api/addresses                   - Save an address
//! GET  /api/addresses                   - Saved addresses
//! PUT  /api/addresses/{addressId}       - Update an address
//! DELETE /api/addresses/{addressId}     - Delete an address
//!
//! # Admin (requires admin)
//! GET  /api/admin/orders                - Every order
//! PUT  /api/admin/orders/{id}/status    - Set an order's status
//! GET  /api/admin/users                 - Every user
//! PUT  /api/admin/users/{id}/toggle-status - Flip a user's active flag
//! PUT  /api/admin/users/{id}/promote    - Grant the admin role
//! POST /api/admin/products              - Create a product
//! PUT  /api/admin/products/{id}         - Update a product
//! DELETE /api/admin/products/{id}       - Delete a product
//!
//! # Upload
//! POST /api/upload                      - Multipart image upload
//! GET  /uploads/*                       - Uploaded images (static)
//! ```

pub mod addresses;
pub mod admin;
pub mod auth;
pub mod orders;
pub mod products;
pub mod upload;

use axum::{
    Json, Router,
    extract::OriginalUri,
    http::{Method, StatusCode},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

/// The standard `{success, message?, data?}` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A success envelope carrying data.
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }

    /// A success envelope with a message and data.
    pub fn with_message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    /// A success envelope with a message only.
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data: None,
        })
    }
}

/// Liveness probe.
///
/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "General Store API is running",
        "timestamp": Utc::now(),
    }))
}

/// API index: a map of the mounted endpoint groups.
///
/// GET /
pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "General Store API",
        "endpoints": {
            "health": "/health",
            "products": "/api/products",
            "auth": "/api/auth",
            "orders": "/api/orders",
            "addresses": "/api/addresses",
            "admin": "/api/admin",
            "upload": "/api/upload",
        },
    }))
}

/// Catch-all for unmatched routes.
pub async fn fallback(method: Method, OriginalUri(uri): OriginalUri) -> impl axum::response::IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": format!("Route not found: {method} {}", uri.path()),
        })),
    )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/categories", get(products::categories))
        .route("/category/{category}", get(products::by_category))
        .route("/suggestions", get(products::suggestions))
        .route("/{id}", get(products::show))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/refresh-token", post(auth::refresh_token))
        .route("/profile", get(auth::profile))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/reset-password", post(auth::reset_password))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::list_all))
        .route("/customer/orders", get(orders::customer_orders))
        .route("/{order_id}", get(orders::show))
        .route("/{order_id}/cancel", post(orders::cancel))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(addresses::create).get(addresses::index))
        .route(
            "/{address_id}",
            put(addresses::update).delete(addresses::remove),
        )
}

/// Create the admin routes router. Every handler requires an admin token.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::list_orders))
        .route("/orders/{id}/status", put(admin::update_order_status))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/toggle-status", put(admin::toggle_user_status))
        .route("/users/{id}/promote", put(admin::promote_user))
        .route("/products", post(admin::create_product))
        .route(
            "/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
}

/// Create the API router mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/auth", auth_routes())
        .nest("/orders", order_routes())
        .nest("/addresses", address_routes())
        .nest("/admin", admin_routes())
        .route("/upload", post(upload::upload_image))
}
