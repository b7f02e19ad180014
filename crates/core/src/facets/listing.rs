//! Assemble a collection listing page from product data.

use serde::Serialize;

use crate::types::facet::{FacetGroup, FacetMap, facet_label, presentation_order};
use crate::types::{ActiveFilters, CatalogProduct};

use super::cache::{FilterCache, FilteredProducts};
use super::extract::extract_facets;
use super::merge::merge_facets;
use super::paginate::{DEFAULT_PAGE_SIZE, paginate, total_pages};

/// Requested page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub number: usize,
    /// Products per page.
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Create a page request.
    #[must_use]
    pub const fn new(number: usize, size: usize) -> Self {
        Self { number, size }
    }
}

/// Everything the presentation layer needs to render a collection page.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionListing {
    /// Products on the current page.
    pub products: Vec<CatalogProduct>,
    /// Merged facets in presentation order.
    pub facets: Vec<FacetGroup>,
    /// Products matching the active filters, before pagination.
    pub filtered_count: usize,
    /// Products in the collection, before filtering.
    pub total_count: usize,
    /// 1-based current page.
    pub current_page: usize,
    /// Number of pages for the filtered result.
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Build the listing for one request.
///
/// `seed` is the instant facet catalog for the collection; `products` is the
/// full candidate set. Filtering goes through `cache` only when at least one
/// facet key is constrained.
#[must_use]
pub fn build_listing(
    seed: &FacetMap,
    products: &[CatalogProduct],
    filters: &ActiveFilters,
    cache: &mut FilterCache,
    page: PageRequest,
) -> CollectionListing {
    let filtered = filter_for_listing(products, filters, cache);
    assemble_listing(seed, products, filters, &filtered, page)
}

/// The filtered candidate list, memoized in `cache` when anything is selected.
#[must_use]
pub fn filter_for_listing(
    products: &[CatalogProduct],
    filters: &ActiveFilters,
    cache: &mut FilterCache,
) -> FilteredProducts {
    if filters.is_unconstrained() {
        products.into()
    } else {
        cache.filter_cached(products, filters)
    }
}

/// Facets and the page window for an already filtered list.
///
/// Needs no cache, so callers sharing a [`FilterCache`] can run it after
/// releasing their lock.
#[must_use]
pub fn assemble_listing(
    seed: &FacetMap,
    products: &[CatalogProduct],
    filters: &ActiveFilters,
    filtered: &[CatalogProduct],
    page: PageRequest,
) -> CollectionListing {
    let facets = merge_facets(seed, extract_facets(products, filters));
    let window = paginate(filtered, page.number, page.size);

    CollectionListing {
        products: window.items,
        facets: facet_groups(&facets, filters),
        filtered_count: filtered.len(),
        total_count: products.len(),
        current_page: window.page_number,
        total_pages: total_pages(filtered.len(), page.size),
        has_next_page: window.has_next_page,
        has_previous_page: window.has_previous_page,
    }
}

/// Turn a facet map into presentation groups, marking selected values.
#[must_use]
pub fn facet_groups(facets: &FacetMap, filters: &ActiveFilters) -> Vec<FacetGroup> {
    presentation_order(facets.keys().map(String::as_str))
        .into_iter()
        .map(|key| FacetGroup {
            key: key.to_owned(),
            label: facet_label(key).to_owned(),
            values: facets.get(key).cloned().unwrap_or_default(),
            selected: filters
                .selected(key)
                .map(|values| values.iter().cloned().collect())
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::seed::seed_facets;

    fn catalog(n: usize) -> Vec<CatalogProduct> {
        (0..n)
            .map(|i| {
                let vendor = if i % 2 == 0 { "SKF" } else { "FAG" };
                CatalogProduct::new(format!("{i}"), format!("Lager {i}"))
                    .with_vendor(vendor)
                    .with_metafield("bredd", &format!("{}", i % 5 + 5))
            })
            .collect()
    }

    #[test]
    fn test_unfiltered_listing_skips_cache() {
        let mut cache = FilterCache::default();
        let products = catalog(125);

        let listing = build_listing(
            &seed_facets("spårkullager"),
            &products,
            &ActiveFilters::new(),
            &mut cache,
            PageRequest::new(3, 48),
        );

        assert_eq!(listing.products.len(), 29);
        assert_eq!(listing.filtered_count, 125);
        assert_eq!(listing.total_count, 125);
        assert_eq!(listing.total_pages, 3);
        assert!(!listing.has_next_page);
        assert!(listing.has_previous_page);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_filtered_listing_uses_cache() {
        let mut cache = FilterCache::default();
        let products = catalog(10);
        let filters = ActiveFilters::new().with("vendor", ["SKF"]);

        let listing = build_listing(
            &seed_facets("spårkullager"),
            &products,
            &filters,
            &mut cache,
            PageRequest::default(),
        );

        assert_eq!(listing.filtered_count, 5);
        assert_eq!(listing.total_count, 10);
        assert_eq!(listing.total_pages, 1);
        assert_eq!(cache.len(), 1);
        assert!(listing.products.iter().all(|p| p.vendor.as_deref() == Some("SKF")));
    }

    #[test]
    fn test_facet_groups_mark_selection_and_order() {
        let mut cache = FilterCache::default();
        let filters = ActiveFilters::new().with("vendor", ["SKF"]);

        let listing = build_listing(
            &seed_facets("spårkullager"),
            &catalog(4),
            &filters,
            &mut cache,
            PageRequest::default(),
        );

        let keys: Vec<&str> = listing.facets.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["productType", "vendor", "bredd", "material"]);

        let vendor = listing.facets.iter().find(|g| g.key == "vendor");
        assert_eq!(
            vendor.map(|g| g.selected.clone()),
            Some(vec!["SKF".to_string()])
        );
        assert_eq!(vendor.map(|g| g.label.as_str()), Some("Tillverkare"));
    }

    #[test]
    fn test_empty_collection_still_has_seed_facets() {
        let mut cache = FilterCache::default();
        let listing = build_listing(
            &seed_facets("spårkullager"),
            &[],
            &ActiveFilters::new(),
            &mut cache,
            PageRequest::default(),
        );

        assert!(listing.products.is_empty());
        assert_eq!(listing.total_pages, 0);
        assert_eq!(listing.facets.len(), 3);
    }

    #[test]
    fn test_split_steps_match_build_listing() {
        let products = catalog(60);
        let seed = seed_facets("alla-lager");
        let filters = ActiveFilters::new().with("vendor", ["SKF"]);
        let page = PageRequest::new(2, 10);

        let mut cache = FilterCache::default();
        let filtered = filter_for_listing(&products, &filters, &mut cache);
        let split = assemble_listing(&seed, &products, &filters, &filtered, page);

        let whole = build_listing(&seed, &products, &filters, &mut FilterCache::default(), page);

        assert_eq!(split.products, whole.products);
        assert_eq!(split.facets, whole.facets);
        assert_eq!(split.filtered_count, whole.filtered_count);
        assert_eq!(cache.len(), 1);
    }

}
