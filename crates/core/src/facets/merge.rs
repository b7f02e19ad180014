//! Combine seeded and extracted facets.

use std::collections::BTreeSet;

use crate::types::facet::{FacetMap, sorted_values};

/// Merge extracted facets into the seed catalog.
///
/// Keys present in both are unioned and re-sorted. Keys only in `extracted`
/// are inserted as they are.
#[must_use]
pub fn merge_facets(seed: &FacetMap, extracted: FacetMap) -> FacetMap {
    let mut merged = seed.clone();

    for (key, values) in extracted {
        match merged.remove(&key) {
            Some(existing) => {
                let union: BTreeSet<String> = existing.into_iter().chain(values).collect();
                let sorted = sorted_values(&key, union);
                merged.insert(key, sorted);
            }
            None => {
                merged.insert(key, values);
            }
        }
    }

    merged
}
