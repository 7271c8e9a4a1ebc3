//! Integration tests for catalog browsing, search, and the address book.
//!
//! These tests require a running, freshly seeded server:
//! `cargo run -p general-store-server`
//!
//! Run with: `cargo test -p general-store-integration-tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("GENERAL_STORE_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_catalog_listing_and_category_filter() {
    let resp = reqwest::get(format!("{}/api/products", base_url()))
        .await
        .expect("listing request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid listing response");
    let all = body["data"].as_array().expect("missing data");
    assert!(!all.is_empty());

    let resp = reqwest::get(format!("{}/api/products?category=kitchen", base_url()))
        .await
        .expect("filtered request failed");
    let body: Value = resp.json().await.expect("invalid filtered response");
    let kitchen = body["data"].as_array().expect("missing data");
    assert!(!kitchen.is_empty());
    assert!(kitchen.iter().all(|p| p["category"] == "kitchen"));
    assert!(kitchen.len() < all.len());
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_categories_cover_the_storefront() {
    let resp = reqwest::get(format!("{}/api/products/categories", base_url()))
        .await
        .expect("categories request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid categories response");
    let slugs: Vec<&str> = body["data"]
        .as_array()
        .expect("missing data")
        .iter()
        .filter_map(|c| c["slug"].as_str())
        .collect();
    for expected in ["kitchen", "snacks", "beverages", "dairy"] {
        assert!(slugs.contains(&expected), "missing category {expected}");
    }
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_search_and_suggestions() {
    let resp = reqwest::get(format!("{}/api/products?search=rice", base_url()))
        .await
        .expect("search request failed");
    let body: Value = resp.json().await.expect("invalid search response");
    let hits = body["data"].as_array().expect("missing data");
    assert!(!hits.is_empty());

    // Suggestions honor the limit and are trimmed projections
    let resp = reqwest::get(format!(
        "{}/api/products/suggestions?search=a&limit=2",
        base_url()
    ))
    .await
    .expect("suggestions request failed");
    let body: Value = resp.json().await.expect("invalid suggestions response");
    let suggestions = body["data"].as_array().expect("missing data");
    assert!(suggestions.len() <= 2);
    for suggestion in suggestions {
        assert!(suggestion["name"].as_str().is_some());
        assert!(suggestion.get("variants").is_none());
        assert!(suggestion.get("description").is_none());
    }

    // An empty search yields an empty list
    let resp = reqwest::get(format!("{}/api/products/suggestions", base_url()))
        .await
        .expect("suggestions request failed");
    let body: Value = resp.json().await.expect("invalid suggestions response");
    assert_eq!(body["data"].as_array().expect("missing data").len(), 0);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_unknown_product_detail() {
    let resp = reqwest::get(format!(
        "{}/api/products/{}",
        base_url(),
        uuid::Uuid::new_v4()
    ))
    .await
    .expect("detail request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("invalid response");
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_address_book_default_flag() {
    let client = Client::new();
    let address = |label: &str, is_default: bool| {
        json!({
            "label": label,
            "name": "Asha Rao",
            "phone": "9876543210",
            "line1": "12 MG Road, 2nd Cross",
            "city": "Bengaluru",
            "state": "Karnataka",
            "pincode": "560001",
            "isDefault": is_default,
        })
    };

    let resp = client
        .post(format!("{}/api/addresses", base_url()))
        .json(&address("Home", true))
        .send()
        .await
        .expect("create request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("invalid response");
    let home_id = body["data"]["id"].as_str().expect("missing id").to_string();

    let resp = client
        .post(format!("{}/api/addresses", base_url()))
        .json(&address("Office", true))
        .send()
        .await
        .expect("create request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Setting a new default clears the sibling flag
    let resp = client
        .get(format!("{}/api/addresses", base_url()))
        .send()
        .await
        .expect("listing request failed");
    let body: Value = resp.json().await.expect("invalid listing response");
    let entries = body["data"].as_array().expect("missing data");
    let home = entries
        .iter()
        .find(|a| a["id"] == home_id.as_str())
        .expect("home entry missing");
    assert_eq!(home["isDefault"], false);
    assert_eq!(
        entries.iter().filter(|a| a["isDefault"] == true).count(),
        1
    );
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_address_partial_update() {
    let client = Client::new();
    let resp = client
        .post(format!("{}/api/addresses", base_url()))
        .json(&json!({
            "label": "Home",
            "name": "Asha Rao",
            "phone": "9876543210",
            "line1": "12 MG Road, 2nd Cross",
            "city": "Bengaluru",
            "state": "Karnataka",
            "pincode": "560001",
        }))
        .send()
        .await
        .expect("create request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("invalid response");
    let id = body["data"]["id"].as_str().expect("missing id").to_string();

    // A label-only body patches that field and leaves the rest intact
    let resp = client
        .put(format!("{}/api/addresses/{id}", base_url()))
        .json(&json!({ "label": "Work" }))
        .send()
        .await
        .expect("update request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid update response");
    assert_eq!(body["data"]["label"], "Work");
    assert_eq!(body["data"]["name"], "Asha Rao");
    assert_eq!(body["data"]["pincode"], "560001");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_address_validation_reports_fields() {
    let client = Client::new();
    let resp = client
        .post(format!("{}/api/addresses", base_url()))
        .json(&json!({
            "label": "Home",
            "name": "Asha Rao",
            "phone": "12345",
            "line1": "12 MG Road, 2nd Cross",
            "city": "Bengaluru",
            "state": "Karnataka",
            "pincode": "56",
        }))
        .send()
        .await
        .expect("create request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("invalid response");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("missing errors")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"address.phone"));
    assert!(fields.contains(&"address.pincode"));
}
