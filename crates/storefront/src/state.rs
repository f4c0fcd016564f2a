//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::middleware::SessionCache;
use crate::woocommerce::{WooCommerceClient, WooCommerceError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, the WooCommerce client, and the session store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    woocommerce: WooCommerceClient,
    sessions: SessionCache,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the WooCommerce client cannot be built from the
    /// configuration.
    pub fn new(config: StorefrontConfig) -> Result<Self, WooCommerceError> {
        let woocommerce = WooCommerceClient::new(&config.woocommerce)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                woocommerce,
                sessions: SessionCache::default(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the WooCommerce API client.
    #[must_use]
    pub fn woocommerce(&self) -> &WooCommerceClient {
        &self.inner.woocommerce
    }

    /// Get a reference to the in-memory session store.
    #[must_use]
    pub fn sessions(&self) -> &SessionCache {
        &self.inner.sessions
    }
}
