//! Checkout API handler.
//!
//! Turns the cart posted by the storefront into an unpaid WooCommerce order.
//! Payment happens afterwards on WooCommerce's own order-pay page, reached
//! through the returned `payment_url`.

use axum::{Json, body::Bytes, extract::State};
use headless_woo_core::{CartSubmission, OrderId, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::state::AppState;
use crate::woocommerce::{CreateOrderInput, Order};

/// Reduced view of a WooCommerce order returned to the browser.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub number: String,
    pub status: OrderStatus,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    pub needs_payment: bool,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            number: order.number,
            status: order.status,
            total: order.total,
            payment_url: order.payment_url,
            needs_payment: order.needs_payment,
        }
    }
}

/// Successful checkout response.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub order: OrderSummary,
}

/// Create an unpaid order from the posted cart.
///
/// Returns 400 when the billing email is missing or the cart is empty, and
/// 500 with the underlying message for anything else. A single attempt is
/// made against WooCommerce.
///
/// The body is read as JSON whatever `Content-Type` the browser sent.
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Result<Json<CheckoutResponse>> {
    let submission: CartSubmission =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    let draft = submission.validate()?;

    tracing::info!(
        line_items = draft.line_items().len(),
        units = draft.item_count(),
        "Creating unpaid order"
    );

    let order = state
        .woocommerce()
        .create_order(&CreateOrderInput::unpaid(draft))
        .await?;

    let order_id = order.id.to_string();
    add_breadcrumb("checkout", "Order created", Some(&[("order_id", order_id.as_str())]));
    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        paid = order.status.is_paid(),
        needs_payment = order.needs_payment,
        "Order created"
    );

    // The confirmation page clears this once the customer returns from payment
    if let Err(e) = session.insert(session_keys::PENDING_ORDER_ID, order.id).await {
        tracing::warn!("Failed to save pending order to session: {e}");
    }

    Ok(Json(CheckoutResponse {
        success: true,
        order: OrderSummary::from(order),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use axum::http::StatusCode;
    use httpmock::prelude::*;
    use serde_json::{Value, json};
    use tower_sessions::{SessionStore, session::Id};

    use crate::routes::app;
    use crate::test_support::{SECRET, call, checkout_request, query_auth_state, test_state};

    use super::*;

    fn order_response() -> Value {
        json!({
            "id": 727,
            "parent_id": 0,
            "number": "727",
            "order_key": "wc_order_58d2d042d1d",
            "status": "pending",
            "currency": "USD",
            "total": "29.35",
            "payment_url": "https://shop.example.com/checkout/order-pay/727/?pay_for_order=true&key=wc_order_58d2d042d1d",
            "needs_payment": true,
            "line_items": [{ "id": 315, "product_id": 93, "quantity": 2 }]
        })
    }

    fn valid_cart() -> Value {
        json!({
            "billing": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "country": "GB"
            },
            "shipping": { "first_name": "Ada", "country": "GB" },
            "line_items": [{ "product_id": 93, "quantity": 2 }],
            "customer_note": "Leave at the door"
        })
    }

    #[tokio::test]
    async fn test_missing_email_is_rejected() {
        let server = MockServer::start_async().await;
        let woo = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(201).json_body(order_response());
            })
            .await;

        let body = json!({
            "billing": { "first_name": "Ada" },
            "line_items": [{ "product_id": 93, "quantity": 1 }]
        });
        let response = call(app(test_state(&server.base_url())), checkout_request(&body, None)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({ "error": "Email is required" }));
        woo.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let server = MockServer::start_async().await;
        let body = json!({
            "billing": { "email": "ada@example.com" },
            "line_items": []
        });
        let response = call(app(test_state(&server.base_url())), checkout_request(&body, None)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({ "error": "Cart is empty" }));
    }

    #[tokio::test]
    async fn test_email_is_checked_before_cart() {
        let server = MockServer::start_async().await;
        let response = call(
            app(test_state(&server.base_url())),
            checkout_request(&json!({}), None),
        )
        .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json()["error"], "Email is required");
    }

    #[tokio::test]
    async fn test_valid_cart_creates_unpaid_order() {
        let server = MockServer::start_async().await;
        let woo = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/wp-json/wc/v3/orders")
                    .json_body_partial(
                        r#"{
                            "set_paid": false,
                            "billing": { "email": "ada@example.com" },
                            "shipping": { "country": "GB" },
                            "line_items": [{ "product_id": 93, "quantity": 2 }],
                            "customer_note": "Leave at the door"
                        }"#,
                    );
                then.status(201).json_body(order_response());
            })
            .await;

        let response = call(
            app(test_state(&server.base_url())),
            checkout_request(&valid_cart(), None),
        )
        .await;

        woo.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!({
                "success": true,
                "order": {
                    "id": 727,
                    "number": "727",
                    "status": "pending",
                    "total": "29.35",
                    "payment_url": "https://shop.example.com/checkout/order-pay/727/?pay_for_order=true&key=wc_order_58d2d042d1d",
                    "needs_payment": true
                }
            })
        );
    }

    #[tokio::test]
    async fn test_created_order_is_remembered_in_session() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/wp-json/wc/v3/orders");
                then.status(201).json_body(order_response());
            })
            .await;

        let state = test_state(&server.base_url());
        let response = call(app(state.clone()), checkout_request(&valid_cart(), None)).await;
        assert_eq!(response.status, StatusCode::OK);

        let cookie = response.session_cookie().unwrap();
        let (_, id) = cookie.split_once('=').unwrap();
        let record = state
            .sessions()
            .load(&Id::from_str(id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.data.get(session_keys::PENDING_ORDER_ID), Some(&json!(727)));
    }

    #[tokio::test]
    async fn test_woocommerce_failure_surfaces_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/wp-json/wc/v3/orders");
                then.status(400).json_body(json!({
                    "code": "woocommerce_rest_invalid_product_id",
                    "message": "Invalid product ID.",
                    "data": { "status": 400 }
                }));
            })
            .await;

        let response = call(
            app(test_state(&server.base_url())),
            checkout_request(&valid_cart(), None),
        )
        .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json(), json!({ "error": "Invalid product ID." }));
    }

    #[tokio::test]
    async fn test_unreachable_woocommerce_is_server_error() {
        // Nothing listens on the discard port
        let response = call(
            app(test_state("http://127.0.0.1:9")),
            checkout_request(&valid_cart(), None),
        )
        .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = response.json()["error"].as_str().unwrap().to_string();
        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_server_error() {
        let server = MockServer::start_async().await;
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/checkout")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{\"billing\": "))
            .unwrap();

        let response = call(app(test_state(&server.base_url())), request).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.json()["error"].is_string());
    }

    #[test]
    fn test_summary_omits_missing_payment_url() {
        let order: Order = serde_json::from_value(json!({
            "id": 5, "number": "5", "status": "processing", "total": "0.00"
        }))
        .unwrap();

        let summary = serde_json::to_value(OrderSummary::from(order)).unwrap();
        assert!(summary.get("payment_url").is_none());
        assert_eq!(summary["needs_payment"], false);
        assert_eq!(summary["total"], "0.00");
    }

    #[tokio::test]
    async fn test_loosely_typed_fields_reach_woocommerce() {
        let server = MockServer::start_async().await;
        let woo = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/wp-json/wc/v3/orders")
                    .json_body_partial(
                        r#"{
                            "billing": { "email": "a@b.c", "postcode": 12345 },
                            "line_items": [{ "product_id": 1, "quantity": "2" }]
                        }"#,
                    );
                then.status(201).json_body(order_response());
            })
            .await;

        let body = json!({
            "billing": { "email": "a@b.c", "postcode": 12345 },
            "line_items": [{ "product_id": 1, "quantity": "2" }]
        });
        let response = call(app(test_state(&server.base_url())), checkout_request(&body, None)).await;

        woo.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["success"], true);
    }

    #[tokio::test]
    async fn test_body_without_json_content_type_is_accepted() {
        let server = MockServer::start_async().await;
        let woo = server
            .mock_async(|when, then| {
                when.method(POST).path("/wp-json/wc/v3/orders");
                then.status(201).json_body(order_response());
            })
            .await;

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/checkout")
            .header("content-type", "text/plain;charset=UTF-8")
            .body(axum::body::Body::from(valid_cart().to_string()))
            .unwrap();
        let response = call(app(test_state(&server.base_url())), request).await;

        woo.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_transport_failure_does_not_expose_credentials() {
        // Query-string auth puts the keys in the URL; nothing listens on port 9
        let response = call(
            app(query_auth_state("http://127.0.0.1:9")),
            checkout_request(&valid_cart(), None),
        )
        .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.body.contains(SECRET));
        assert!(!response.body.contains("consumer_key"));
        assert!(!response.body.contains("127.0.0.1"));
    }
}
