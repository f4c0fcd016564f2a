//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All JSON handlers return `Result<T, AppError>`,
//! and every error leaves the storefront as `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use headless_woo_core::CartError;
use serde::Serialize;
use thiserror::Error;

use crate::woocommerce::WooCommerceError;

/// Message used when an error carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "Failed to create order";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart failed the storefront's own checks.
    #[error(transparent)]
    InvalidCart(#[from] CartError),

    /// WooCommerce API operation failed.
    #[error(transparent)]
    WooCommerce(#[from] WooCommerceError),

    /// Request body could not be read as a cart submission.
    #[error("{0}")]
    InvalidBody(String),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Only the storefront's own cart checks are client errors; everything
    /// else is reported as a processing failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCart(_) => StatusCode::BAD_REQUEST,
            Self::WooCommerce(_) | Self::InvalidBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client, never empty.
    #[must_use]
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Checkout error"
            );
        } else {
            tracing::debug!(error = %self, "Checkout rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for checkout actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("checkout", "Order created", Some(&[("order_id", "727")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
