//! Domain types for Shopify Storefront API responses.
//!
//! Products are represented by [`bearings_core::CatalogProduct`]; this module
//! only adds the collection-level types the storefront serves.

use std::sync::Arc;

use bearings_core::CatalogProduct;
use serde::{Deserialize, Serialize};

/// How much of a collection to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMode {
    /// One small batch of the newest products, enough to derive facets.
    Recent,
    /// Every product in the collection, up to the configured cap.
    Full,
}

impl FetchMode {
    /// Stable name used in cache keys and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Full => "full",
        }
    }
}

/// Collection metadata without products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Shopify collection GID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Display title.
    pub title: String,
    /// Plain-text description, `None` when empty.
    pub description: Option<String>,
}

/// A collection together with its fetched products.
#[derive(Debug, Clone)]
pub struct CollectionProducts {
    /// Collection metadata.
    pub collection: CollectionSummary,
    /// Products in collection order, shared with the filter caches.
    pub products: Arc<[CatalogProduct]>,
    /// Whether the fetch stopped early because of the product cap.
    pub truncated: bool,
}
