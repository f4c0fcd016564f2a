//! Integration tests for Headless Woo.
//!
//! These run against a live storefront pointed at a WooCommerce store, so
//! every test is `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront
//! cargo run -p headless-woo-storefront
//!
//! # Run integration tests
//! cargo test -p headless-woo-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_checkout` - Checkout API validation and confirmation page
//!
//! Set `STOREFRONT_BASE_URL` to target a storefront other than
//! `http://localhost:3000`.

use headless_woo_core::CartSubmission;
use serde_json::json;

/// Base URL for the storefront under test.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A cart with a billing email and a single line item.
///
/// `product_id` must exist in the target store for order creation to succeed.
#[must_use]
pub fn sample_cart(email: &str, product_id: i64) -> CartSubmission {
    CartSubmission {
        billing: Some(json!({
            "first_name": "Integration",
            "last_name": "Test",
            "email": email
        })),
        shipping: None,
        line_items: Some(json!([{ "product_id": product_id, "quantity": 1 }])),
        customer_note: None,
    }
}
