//! Public catalog routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use general_store_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::Product;
use crate::routes::ApiResponse;
use crate::state::AppState;
use crate::stores::Category;

/// Default number of typeahead suggestions.
const DEFAULT_SUGGESTION_LIMIT: usize = 6;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

/// Product listing, optionally narrowed by category and search.
///
/// GET /api/products
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<Product>>> {
    let mut products = match query.category.as_deref() {
        Some(category) if !category.trim().is_empty() => state.catalog().find_by_category(category),
        _ => state.catalog().all(),
    };
    if let Some(search) = query.search.as_deref()
        && !search.trim().is_empty()
    {
        products.retain(|p| p.matches_search(search));
    }
    if let Some(limit) = query.limit
        && limit > 0
    {
        products.truncate(limit);
    }
    ApiResponse::data(products)
}

/// Distinct categories present in the catalog.
///
/// GET /api/products/categories
pub async fn categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<Category>>> {
    ApiResponse::data(state.catalog().categories())
}

/// Products in a single category.
///
/// GET /api/products/category/{category}
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<ApiResponse<Vec<Product>>> {
    ApiResponse::data(state.catalog().find_by_category(&category))
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub search: String,
    pub limit: Option<usize>,
}

/// Trimmed product projection for typeahead suggestions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionView {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub image_url: String,
    pub price: Decimal,
}

impl From<Product> for SuggestionView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            brand: product.brand,
            category: product.category,
            image_url: product.image_url,
            price: product.price,
        }
    }
}

/// Typeahead suggestions. An empty search yields an empty list.
///
/// GET /api/products/suggestions
pub async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Json<ApiResponse<Vec<SuggestionView>>> {
    let limit = match query.limit {
        Some(limit) if limit > 0 => limit,
        _ => DEFAULT_SUGGESTION_LIMIT,
    };
    ApiResponse::data(
        state
            .catalog()
            .suggestions(&query.search, limit)
            .into_iter()
            .map(SuggestionView::from)
            .collect(),
    )
}

/// Product detail.
///
/// GET /api/products/{id}
///
/// # Errors
///
/// Returns 404 for an unknown product id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound("Product not found".to_string()))?;
    let product = state
        .catalog()
        .find_by_id(id)
        .map_err(|_| AppError::NotFound("Product not found".to_string()))?;
    Ok(ApiResponse::data(product))
}
