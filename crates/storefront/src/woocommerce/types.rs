//! Request and response bodies for the WooCommerce orders endpoint.

use headless_woo_core::{OrderDraft, OrderId, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body for `POST /orders`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderInput {
    /// Always `false` here: payment happens on WooCommerce's order-pay page.
    pub set_paid: bool,
    pub billing: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Value>,
    pub line_items: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<Value>,
}

impl CreateOrderInput {
    /// Build an unpaid order from a validated cart.
    #[must_use]
    pub fn unpaid(draft: OrderDraft) -> Self {
        let (billing, shipping, line_items, customer_note) = draft.into_parts();
        Self {
            set_paid: false,
            billing,
            shipping,
            line_items,
            customer_note,
        }
    }
}

/// An order as returned by WooCommerce.
///
/// Only the fields the storefront reads are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub number: String,
    pub status: OrderStatus,
    pub total: Decimal,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub needs_payment: bool,
}

/// Error body returned by the WordPress REST API.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}
