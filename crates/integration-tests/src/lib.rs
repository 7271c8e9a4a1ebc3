//! Integration tests for the General Store API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server
//! cargo run -p general-store-server
//!
//! # Run integration tests against it
//! cargo test -p general-store-integration-tests -- --ignored
//! ```
//!
//! The server address is taken from `GENERAL_STORE_BASE_URL`
//! (default `http://localhost:5000`). Tests assume a freshly seeded
//! server: the seed catalog present and the seeded admin account
//! (`admin@general-store.local` / `admin123`) available.
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart pricing, order placement, tracking, cancellation
//! - `auth_flow` - Registration, login, tokens, OTP password reset
//! - `admin_access` - Admin gating and admin console operations
//! - `catalog` - Catalog browsing, search, and suggestions
