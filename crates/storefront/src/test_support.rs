//! Shared helpers for in-process router tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use secrecy::SecretString;
use tower::ServiceExt;
use url::Url;

use crate::config::{StorefrontConfig, WooCommerceConfig};
use crate::state::AppState;

/// Consumer secret used by test configurations.
pub const SECRET: &str = "cs_9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c4b3a2f1e0d";

/// Build application state pointing WooCommerce at `store_url`.
pub fn test_state(store_url: &str) -> AppState {
    state_with_auth(store_url, false)
}

/// Like [`test_state`], with the keys sent as query parameters.
pub fn query_auth_state(store_url: &str) -> AppState {
    state_with_auth(store_url, true)
}

fn state_with_auth(store_url: &str, query_string_auth: bool) -> AppState {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        woocommerce: WooCommerceConfig {
            store_url: Url::parse(store_url).unwrap(),
            api_version: "wc/v3".to_string(),
            consumer_key: SecretString::from("ck_4f1c2a9e7b3d5f6a8c0e1b2d3f4a5c6e7d8f9a0b"),
            consumer_secret: SecretString::from(SECRET),
            query_string_auth,
            timeout: Duration::from_secs(5),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };

    AppState::new(config).expect("test state")
}

/// A response reduced to what the tests look at.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("body is not valid JSON")
    }

    /// `name=value` pair from the session `Set-Cookie` header, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(crate::middleware::session::SESSION_COOKIE_NAME))
            .and_then(|v| v.split(';').next())
            .map(str::to_owned)
    }
}

/// Drive the router with a single request.
pub async fn call(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.expect("oneshot failed");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collect failed");

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("body is not UTF-8"),
    }
}

/// `POST /api/checkout` with a JSON body.
pub fn checkout_request(body: &serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/checkout")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// `GET` a path, optionally with a cookie.
pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}
