//! WooCommerce API client implementation.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use crate::config::WooCommerceConfig;
use crate::woocommerce::WooCommerceError;
use crate::woocommerce::types::{CreateOrderInput, Order};

const USER_AGENT: &str = concat!("headless-woo-storefront/", env!("CARGO_PKG_VERSION"));

/// Client for the WooCommerce REST API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct WooCommerceClient {
    inner: Arc<WooCommerceClientInner>,
}

struct WooCommerceClientInner {
    client: reqwest::Client,
    orders_endpoint: Url,
    consumer_key: SecretString,
    consumer_secret: SecretString,
    query_string_auth: bool,
}

impl WooCommerceClient {
    /// Create a new WooCommerce API client.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(config: &WooCommerceConfig) -> Result<Self, WooCommerceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(WooCommerceClientInner {
                client,
                orders_endpoint: config.endpoint("orders")?,
                consumer_key: config.consumer_key.clone(),
                consumer_secret: config.consumer_secret.clone(),
                query_string_auth: config.query_string_auth,
            }),
        })
    }

    /// Create an order.
    ///
    /// Sends a single request; the caller decides what to do with failures.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, WooCommerce rejects the order, or
    /// the response cannot be decoded.
    #[instrument(skip(self, input), fields(line_items = input.line_items.len()))]
    pub async fn create_order(&self, input: &CreateOrderInput) -> Result<Order, WooCommerceError> {
        let request = self
            .authenticate(self.inner.client.post(self.inner.orders_endpoint.clone()))
            .json(input);

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "WooCommerce rejected order");
            return Err(WooCommerceError::from_response(status, &body));
        }

        let order: Order =
            serde_json::from_str(&body).map_err(|e| WooCommerceError::Parse(e.to_string()))?;

        debug!(order_id = %order.id, status = %order.status, "WooCommerce order created");
        Ok(order)
    }

    /// Attach consumer credentials, as Basic auth or query parameters.
    fn authenticate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.inner.consumer_key.expose_secret();
        let secret = self.inner.consumer_secret.expose_secret();

        if self.inner.query_string_auth {
            request.query(&[("consumer_key", key), ("consumer_secret", secret)])
        } else {
            request.basic_auth(key, Some(secret))
        }
    }
}
