//! Application state shared across handlers.

use std::sync::Arc;

use bearings_core::facets::SeedCatalog;

use crate::catalog::CollectionCaches;
use crate::config::StorefrontConfig;
use crate::shopify::StorefrontClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the Shopify client, the facet seed catalog and the filter caches.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
    seeds: SeedCatalog,
    filter_caches: CollectionCaches,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let storefront = StorefrontClient::new(&config.shopify, config.catalog.max_products);
        let seeds = SeedCatalog::new(config.catalog.flagship_collection.clone());
        let filter_caches = CollectionCaches::new(config.catalog.filter_cache_capacity);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront,
                seeds,
                filter_caches,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Get a reference to the facet seed catalog.
    #[must_use]
    pub fn seeds(&self) -> &SeedCatalog {
        &self.inner.seeds
    }

    /// Get a reference to the per-collection filter caches.
    #[must_use]
    pub fn filter_caches(&self) -> &CollectionCaches {
        &self.inner.filter_caches
    }
}
