//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` request/response envelopes with `reqwest` 0.13 for HTTP.
//! Caches collection product lists using `moka` (5-minute TTL).

mod cache;
mod conversions;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use bearings_core::CatalogProduct;
use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::{GraphQLError, ShopifyError};
use crate::shopify::types::{CollectionProducts, CollectionSummary, FetchMode};

use cache::{CacheKey, CacheValue};
use conversions::{convert_collection_node, convert_collection_summary, convert_product};
use queries::{
    GetCollectionProducts, GetCollections, MAX_PAGE_SIZE, RECENT_BATCH_SIZE,
    facet_metafield_identifiers, get_collection_products, get_collections,
};

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Fetches collections and their products, normalized into
/// [`CatalogProduct`]. Fetched lists are cached for 5 minutes; a cache hit
/// hands back the same `Arc` so downstream filter caches can tell a refetch
/// apart from a reuse.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    max_products: usize,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// `max_products` caps how many products a [`FetchMode::Full`] fetch
    /// pulls from one collection.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig, max_products: usize) -> Self {
        let cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config.storefront_private_token.expose_secret().to_string(),
                max_products: max_products.max(1),
                cache,
            }),
        }
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&Q::build_query(variables))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ShopifyError::RateLimited(retry_after_secs(
                response.headers(),
            )));
        }

        let body = response.text().await?;
        decode_response::<Q::ResponseData>(status, &body)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get collection summaries.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(
        &self,
        first: i64,
    ) -> Result<Arc<[CollectionSummary]>, ShopifyError> {
        let first = first.clamp(1, MAX_PAGE_SIZE);
        let cache_key = CacheKey::Collections { first };

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let data = self
            .execute::<GetCollections>(get_collections::Variables { first })
            .await?;

        let collections: Arc<[CollectionSummary]> = data
            .collections
            .nodes
            .into_iter()
            .map(convert_collection_node)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(Arc::clone(&collections)))
            .await;

        Ok(collections)
    }

    /// Get a collection and its products.
    ///
    /// [`FetchMode::Recent`] issues one request for the newest products.
    /// [`FetchMode::Full`] follows cursors until the collection is exhausted
    /// or the product cap is reached.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::NotFound`] if the collection does not exist, or
    /// an error if any API request fails.
    #[instrument(skip(self), fields(handle = %handle, mode = mode.as_str()))]
    pub async fn get_collection_products(
        &self,
        handle: &str,
        mode: FetchMode,
    ) -> Result<CollectionProducts, ShopifyError> {
        let cache_key = CacheKey::CollectionProducts {
            handle: handle.to_string(),
            mode,
        };

        if let Some(CacheValue::CollectionProducts(cached)) =
            self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collection products");
            return Ok(cached);
        }

        let fetched = self.fetch_collection_products(handle, mode).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::CollectionProducts(fetched.clone()))
            .await;

        Ok(fetched)
    }

    async fn fetch_collection_products(
        &self,
        handle: &str,
        mode: FetchMode,
    ) -> Result<CollectionProducts, ShopifyError> {
        use get_collection_products::ProductCollectionSortKeys;

        let (batch_size, sort_key, reverse) = match mode {
            FetchMode::Recent => (
                RECENT_BATCH_SIZE,
                ProductCollectionSortKeys::CREATED,
                Some(true),
            ),
            FetchMode::Full => (
                MAX_PAGE_SIZE,
                ProductCollectionSortKeys::COLLECTION_DEFAULT,
                None,
            ),
        };
        let max_products = self.inner.max_products;

        let mut summary = None;
        let mut products: Vec<CatalogProduct> = Vec::new();
        let mut after: Option<String> = None;
        let mut truncated = false;

        loop {
            let remaining = max_products.saturating_sub(products.len());
            let first = batch_size.min(i64::try_from(remaining).unwrap_or(i64::MAX));

            let variables = get_collection_products::Variables {
                handle: handle.to_string(),
                first,
                after: after.take(),
                sort_key: Some(sort_key),
                reverse,
                identifiers: facet_metafield_identifiers(),
            };

            let data = self.execute::<GetCollectionProducts>(variables).await?;
            let collection = data.collection.ok_or_else(|| {
                ShopifyError::NotFound(format!("Collection not found: {handle}"))
            })?;

            if summary.is_none() {
                summary = Some(convert_collection_summary(&collection));
            }

            let page_info = collection.products.page_info;
            products.extend(collection.products.nodes.into_iter().map(convert_product));

            if mode == FetchMode::Recent || !page_info.has_next_page {
                break;
            }
            if products.len() >= max_products {
                warn!(
                    max_products,
                    "Collection has more products than the fetch cap; list truncated"
                );
                truncated = true;
                break;
            }
            let Some(cursor) = page_info.end_cursor else {
                break;
            };
            after = Some(cursor);
        }

        let collection = summary
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection not found: {handle}")))?;

        debug!(count = products.len(), truncated, "Fetched collection products");

        Ok(CollectionProducts {
            collection,
            products: products.into(),
            truncated,
        })
    }
}

/// Seconds to wait according to `Retry-After`, defaulting to one.
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

/// Turn a Storefront API reply into its `data` payload.
///
/// Non-success statuses, undecodable bodies, GraphQL `errors` and a missing
/// `data` member are all errors; the body excerpt is logged for each.
fn decode_response<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<T, ShopifyError> {
    if !status.is_success() {
        error!(
            status = %status,
            body = %truncate(body, 500),
            "Storefront API returned non-success status"
        );
        return Err(ShopifyError::GraphQL(vec![GraphQLError::local(format!(
            "HTTP {status}: {}",
            truncate(body, 200)
        ))]));
    }

    let response: Response<T> = serde_json::from_str(body).map_err(|e| {
        error!(
            error = %e,
            body = %truncate(body, 500),
            "Failed to decode Storefront API response"
        );
        ShopifyError::Parse(e)
    })?;

    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        debug!(errors = ?errors, "GraphQL errors in response");
        return Err(ShopifyError::GraphQL(
            errors.into_iter().map(GraphQLError::from).collect(),
        ));
    }

    response.data.ok_or_else(|| {
        error!(
            body = %truncate(body, 500),
            "Storefront API response carried neither data nor errors"
        );
        ShopifyError::GraphQL(vec![GraphQLError::local("No data in response")])
    })
}

fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
