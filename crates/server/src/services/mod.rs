//! Business logic services for the General Store backend.
//!
//! # Services
//!
//! - `pricing` - Pure order pricing calculator (subtotal, savings, delivery
//!   fee, grand total)
//! - `orders` - Order lifecycle: creation, status transitions, cancellation
//! - `auth` - Registration, login, tokens, OTP password reset, user admin

pub mod auth;
pub mod orders;
pub mod pricing;

pub use auth::{AuthError, AuthService};
pub use orders::{OrderError, OrderService};
pub use pricing::{PricingError, compute_pricing};
