//! WooCommerce REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTPS with `reqwest`; WooCommerce exposes no GraphQL
//! - WooCommerce is source of truth - NO local order storage, direct API calls
//! - One request per operation; no retries, callers surface failures as-is
//!
//! # Example
//!
//! ```rust,ignore
//! use headless_woo_storefront::woocommerce::{CreateOrderInput, WooCommerceClient};
//!
//! let client = WooCommerceClient::new(&config.woocommerce)?;
//! let order = client.create_order(&CreateOrderInput::unpaid(draft)).await?;
//! println!("pay at {:?}", order.payment_url);
//! ```

mod client;
pub mod types;

pub use client::WooCommerceClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the WooCommerce API.
#[derive(Debug, Error)]
pub enum WooCommerceError {
    /// HTTP request failed (connection, TLS, timeout).
    ///
    /// Built through `From`, which strips the request URL: it carries the
    /// consumer credentials when query-string auth is on.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// API returned a non-success status.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint URL could not be built from configuration.
    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl From<reqwest::Error> for WooCommerceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl WooCommerceError {
    /// Build an API error from a failed response body.
    ///
    /// WooCommerce reports errors as `{"code", "message", "data": {"status"}}`;
    /// anything else falls back to the raw body or the status text.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(|b| b.code.clone());
        let message = parsed
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| {
                format!(
                    "Request failed with status code {}",
                    status.as_u16()
                )
            });

        Self::Api {
            status: status.as_u16(),
            code,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_from_response_uses_woocommerce_message() {
        let body = r#"{"code":"woocommerce_rest_invalid_product_id","message":"Invalid product ID.","data":{"status":400}}"#;
        let err = WooCommerceError::from_response(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.to_string(), "Invalid product ID.");
        assert!(matches!(
            err,
            WooCommerceError::Api { status: 400, code: Some(ref c), .. } if c == "woocommerce_rest_invalid_product_id"
        ));
    }

    #[test]
    fn test_from_response_falls_back_to_raw_body() {
        let err = WooCommerceError::from_response(StatusCode::BAD_GATEWAY, "upstream timed out");
        assert_eq!(err.to_string(), "upstream timed out");
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = WooCommerceError::from_response(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.to_string(), "Request failed with status code 401");
    }
}
