//! Cart submission sent by the storefront's checkout form.
//!
//! The submission is passed through to WooCommerce as posted. Only the two
//! checks the storefront owns look inside it: a billing email must be present
//! and the cart must have line items. Everything else (addresses, quantities,
//! product references, meta data) is WooCommerce's to judge, whatever JSON
//! type it arrives as.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reasons a cart submission is refused before any order is created.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// No billing email was supplied.
    #[error("Email is required")]
    EmailRequired,
    /// The cart has no line items.
    #[error("Cart is empty")]
    EmptyCart,
}

/// The JSON body posted to the checkout endpoint.
///
/// A JSON `null` is treated the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSubmission {
    /// Billing details; must carry an `email`.
    #[serde(default)]
    pub billing: Option<Value>,
    #[serde(default)]
    pub shipping: Option<Value>,
    /// Line items; must be a non-empty array.
    #[serde(default)]
    pub line_items: Option<Value>,
    #[serde(default)]
    pub customer_note: Option<Value>,
}

impl CartSubmission {
    /// Check the two invariants the storefront enforces itself.
    ///
    /// The email is checked before the cart contents.
    ///
    /// # Errors
    ///
    /// - [`CartError::EmailRequired`] if there is no billing object or its
    ///   email is missing, `null`, `false`, `0` or an empty string
    /// - [`CartError::EmptyCart`] if `line_items` is missing or is not a
    ///   non-empty array
    pub fn validate(self) -> Result<OrderDraft, CartError> {
        let billing = self
            .billing
            .filter(|billing| billing.get("email").is_some_and(is_filled))
            .ok_or(CartError::EmailRequired)?;

        let line_items = match self.line_items {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(CartError::EmptyCart),
        };

        Ok(OrderDraft {
            billing,
            shipping: self.shipping,
            line_items,
            customer_note: self.customer_note,
        })
    }
}

/// Whether a value counts as supplied.
fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A cart that passed validation and can be submitted as an order.
///
/// Guarantees a billing email and at least one line item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    billing: Value,
    shipping: Option<Value>,
    line_items: Vec<Value>,
    customer_note: Option<Value>,
}

impl OrderDraft {
    #[must_use]
    pub fn line_items(&self) -> &[Value] {
        &self.line_items
    }

    /// Total number of units across all line items, for logging.
    ///
    /// Items without a readable quantity count as one. Saturates rather than
    /// overflowing on absurd quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.line_items
            .iter()
            .map(|item| {
                item.get("quantity")
                    .and_then(|q| q.as_u64().or_else(|| q.as_str()?.trim().parse().ok()))
                    .unwrap_or(1)
            })
            .fold(0, u64::saturating_add)
    }

    /// Consumes the draft, returning billing, shipping, line items and note.
    #[must_use]
    pub fn into_parts(self) -> (Value, Option<Value>, Vec<Value>, Option<Value>) {
        (
            self.billing,
            self.shipping,
            self.line_items,
            self.customer_note,
        )
    }
}
