//! Order confirmation page.
//!
//! Customers land here after paying. Two redirect sources point at this page:
//! the storefront itself (`?order=123`) and WooCommerce's order-received
//! redirect (`?order-received=123&key=wc_order_...`).

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::models::session_keys;

/// Query parameters accepted by the confirmation page.
#[derive(Debug, Default, Deserialize)]
pub struct SuccessQuery {
    /// Set by the storefront's own redirect.
    pub order: Option<String>,
    /// Set by WooCommerce's order-received redirect.
    #[serde(rename = "order-received")]
    pub order_received: Option<String>,
}

impl SuccessQuery {
    /// The order identifier to display, preferring `order`.
    ///
    /// Empty values are treated as absent.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.order_received.as_deref().filter(|id| !id.is_empty()))
    }
}

/// Order number display data for templates.
#[derive(Clone, Debug)]
pub struct OrderNumberView {
    pub number: String,
    pub view_href: String,
}

impl OrderNumberView {
    fn new(order_id: &str) -> Self {
        Self {
            number: order_id.to_owned(),
            view_href: format!("/account/orders/{}", urlencoding::encode(order_id)),
        }
    }
}

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct SuccessTemplate {
    pub order: Option<OrderNumberView>,
}

/// Loading placeholder fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_loading.html")]
pub struct OrderLoadingTemplate;

/// Remove the cart and pending-order markers from the session.
///
/// Returns how many markers were present. Session failures are logged and
/// otherwise ignored: the customer has already paid, the page must render.
pub async fn clear_checkout_state(session: &Session) -> usize {
    let mut cleared = 0;

    for key in [session_keys::CART, session_keys::PENDING_ORDER_ID] {
        match session.remove_value(key).await {
            Ok(Some(_)) => cleared += 1,
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to clear {key} from session: {e}"),
        }
    }

    cleared
}

/// Display the confirmation page.
#[instrument(skip_all, fields(order_id))]
pub async fn success(session: Session, Query(query): Query<SuccessQuery>) -> impl IntoResponse {
    let cleared = clear_checkout_state(&session).await;

    let order_id = query.order_id();
    if let Some(order_id) = order_id {
        tracing::Span::current().record("order_id", order_id);
    }
    tracing::debug!(cleared, has_order = order_id.is_some(), "Checkout complete");

    SuccessTemplate {
        order: order_id.map(OrderNumberView::new),
    }
}

/// Loading placeholder shown while order details resolve.
pub async fn loading() -> impl IntoResponse {
    OrderLoadingTemplate
}
