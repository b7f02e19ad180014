//! Derive facet values from product data.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::facet::{FacetMap, keys, normalize_facet_value, sorted_values};
use crate::types::{ActiveFilters, CatalogProduct};

/// Collect the facet values present in `products`.
///
/// Values come from metafields (using their display value), the structured
/// `vendor` and `productType` fields, and `key:value` encoded tags. Values
/// are offered in their [`normalize_facet_value`] form; blank values and
/// values that cannot be selected are skipped.
///
/// `_filters` is accepted for symmetry with [`super::filter_products`];
/// extraction always reflects the full candidate set so that selecting one
/// value never hides its siblings.
#[must_use]
pub fn extract_facets(products: &[CatalogProduct], _filters: &ActiveFilters) -> FacetMap {
    let mut found: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut add = |key: &str, value: &str| match normalize_facet_value(key, value) {
        Some(value) => {
            found
                .entry(key.to_owned())
                .or_default()
                .insert(value.into_owned());
        }
        None if !value.trim().is_empty() => {
            tracing::debug!(key, value, "Skipping facet value containing a comma");
        }
        None => {}
    };

    for product in products {
        for metafield in &product.metafields {
            add(&metafield.key, metafield.display_value());
        }
        if let Some(vendor) = &product.vendor {
            add(keys::VENDOR, vendor);
        }
        if let Some(product_type) = &product.product_type {
            add(keys::PRODUCT_TYPE, product_type);
        }
        for (key, value) in product.tag_pairs() {
            add(key, value);
        }
    }

    found
        .into_iter()
        .map(|(key, values)| {
            let sorted = sorted_values(&key, values);
            (key, sorted)
        })
        .collect()
}
