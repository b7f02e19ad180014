//! Per-collection filter caches.
//!
//! A [`FilterCache`] key only describes the filters, so each collection keeps
//! its own cache. The cache is also tied to the product list it was filled
//! from: when the client hands back a different list (the upstream cache
//! expired and the collection was refetched), the collection's cache starts
//! over.
//!
//! Each collection's cache has its own lock, held only while filtering.
//! Facet extraction and pagination run after it is released, and the map
//! lock is held only to find or create an entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bearings_core::facets::{
    CollectionListing, FilterCache, FilteredProducts, PageRequest, assemble_listing,
    filter_for_listing,
};
use bearings_core::{ActiveFilters, CatalogProduct, FacetMap};

use crate::error::AppError;

struct CollectionFilterCache {
    products: Arc<[CatalogProduct]>,
    cache: FilterCache,
}

type SharedCollectionCache = Arc<Mutex<CollectionFilterCache>>;

/// Filter caches for every collection served so far.
pub struct CollectionCaches {
    capacity: usize,
    collections: Mutex<HashMap<String, SharedCollectionCache>>,
}

fn poisoned(what: &str) -> AppError {
    AppError::Internal(format!("{what} lock poisoned"))
}

impl CollectionCaches {
    /// Create an empty set of caches, each holding up to `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            collections: Mutex::new(HashMap::new()),
        }
    }

    fn collection(
        &self,
        handle: &str,
        products: &Arc<[CatalogProduct]>,
    ) -> Result<SharedCollectionCache, AppError> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| poisoned("collection map"))?;

        let entry = collections.entry(handle.to_string()).or_insert_with(|| {
            Arc::new(Mutex::new(CollectionFilterCache {
                products: Arc::clone(products),
                cache: FilterCache::new(self.capacity),
            }))
        });
        Ok(Arc::clone(entry))
    }

    fn filter(
        &self,
        handle: &str,
        products: &Arc<[CatalogProduct]>,
        filters: &ActiveFilters,
    ) -> Result<FilteredProducts, AppError> {
        if filters.is_unconstrained() {
            return Ok(Arc::clone(products));
        }

        let collection = self.collection(handle, products)?;
        let mut entry = collection
            .lock()
            .map_err(|_| poisoned("collection filter cache"))?;

        if !Arc::ptr_eq(&entry.products, products) {
            tracing::debug!(handle, "Product list changed, resetting filter cache");
            entry.products = Arc::clone(products);
            entry.cache.clear();
        }

        Ok(filter_for_listing(products, filters, &mut entry.cache))
    }

    /// Build a listing for `handle`, filtering through its cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if a cache lock is poisoned.
    pub fn listing(
        &self,
        handle: &str,
        seed: &FacetMap,
        products: &Arc<[CatalogProduct]>,
        filters: &ActiveFilters,
        page: PageRequest,
    ) -> Result<CollectionListing, AppError> {
        let filtered = self.filter(handle, products, filters)?;
        Ok(assemble_listing(seed, products, filters, &filtered, page))
    }

    /// Number of cached filter combinations for `handle`.
    #[must_use]
    pub fn cached_entries(&self, handle: &str) -> usize {
        let Some(collection) = self
            .collections
            .lock()
            .ok()
            .and_then(|collections| collections.get(handle).cloned())
        else {
            return 0;
        };
        collection.lock().map_or(0, |entry| entry.cache.len())
    }
}
