//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//!
//! # Checkout API
//! POST /api/checkout              - Create an unpaid WooCommerce order from a cart
//!
//! # Confirmation
//! GET  /checkout/success          - Thank-you page (?order= or ?order-received=)
//! GET  /checkout/success/loading  - Loading placeholder fragment
//! ```

pub mod checkout;
pub mod confirmation;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{create_session_layer, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the checkout API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/checkout", post(checkout::create_order))
}

/// Create the confirmation page routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/success", get(confirmation::success))
        .route("/success/loading", get(confirmation::loading))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .nest("/checkout", checkout_routes())
}

/// Build the full application with middleware, ready to serve.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config(), state.sessions().clone());

    routes()
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check WooCommerce.
async fn health() -> &'static str {
    "ok"
}
