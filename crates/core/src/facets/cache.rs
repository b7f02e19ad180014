//! Bounded memoization of filtered product lists.
//!
//! Entries are keyed by [`ActiveFilters::cache_key`] and evicted oldest-first
//! once the cache holds more than its capacity. Reads never refresh an entry's
//! position and entries never expire.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::types::{ActiveFilters, CatalogProduct};

use super::predicate::filter_products;

/// Default number of filter combinations kept.
pub const DEFAULT_FILTER_CACHE_CAPACITY: usize = 100;

/// A shared, immutable filtered product list.
pub type FilteredProducts = Arc<[CatalogProduct]>;

/// FIFO cache of filtered product lists.
///
/// The cache is scoped to one product list: callers keep one instance per
/// collection, since the key only describes the filters.
#[derive(Debug)]
pub struct FilterCache {
    capacity: usize,
    entries: HashMap<String, FilteredProducts>,
    insertion_order: VecDeque<String>,
}

impl Default for FilterCache {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER_CACHE_CAPACITY)
    }
}

impl FilterCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity + 1),
            insertion_order: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Filter `products`, reusing a previous result for the same filters.
    pub fn filter_cached(
        &mut self,
        products: &[CatalogProduct],
        filters: &ActiveFilters,
    ) -> FilteredProducts {
        let key = filters.cache_key();

        if let Some(hit) = self.entries.get(&key) {
            tracing::debug!(cache_key = %key, "Filter cache hit");
            return Arc::clone(hit);
        }

        tracing::debug!(cache_key = %key, "Filter cache miss");
        let filtered: FilteredProducts = filter_products(products, filters).into();
        self.insert(key, Arc::clone(&filtered));
        filtered
    }

    /// Look up a cached result without computing anything.
    #[must_use]
    pub fn get(&self, filters: &ActiveFilters) -> Option<FilteredProducts> {
        self.entries.get(&filters.cache_key()).cloned()
    }

    fn insert(&mut self, key: String, value: FilteredProducts) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.insertion_order.push_back(key);
        }

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::debug!(cache_key = %oldest, "Evicted filter cache entry");
        }
    }

    /// Number of cached filter combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}
