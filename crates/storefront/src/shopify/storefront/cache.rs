//! Cache types for Storefront API responses.

use std::sync::Arc;

use crate::shopify::types::{CollectionProducts, CollectionSummary, FetchMode};

/// Cache key for fetched collection data.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    CollectionProducts { handle: String, mode: FetchMode },
    Collections { first: i64 },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    CollectionProducts(CollectionProducts),
    Collections(Arc<[CollectionSummary]>),
}
