//! Collection route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use bearings_core::facets::{CollectionListing, PageRequest, extract_facets, facet_groups, merge_facets};
use bearings_core::{ActiveFilters, FacetGroup};
use serde::Serialize;
use tracing::{instrument, warn};
use url::Url;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::shopify::{CollectionSummary, FetchMode, ShopifyError};
use crate::state::AppState;

/// Collections listed by `GET /collections`.
const COLLECTIONS_PER_INDEX: i64 = 100;

/// Parsed query string of a collection page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    /// 1-based page number.
    pub page: usize,
    /// Facet selections.
    pub filters: ActiveFilters,
}

impl CollectionQuery {
    /// Parse decoded query pairs.
    ///
    /// `page` falls back to 1 when absent, unparseable or below 1. Every other
    /// parameter except `cursor` is a facet selection.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let page = pairs
            .iter()
            .rev()
            .find(|(key, _)| key == "page")
            .map_or(1, |(_, value)| parse_page(value));

        Self {
            page,
            filters: ActiveFilters::from_query_pairs(
                pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ),
        }
    }
}

fn parse_page(value: &str) -> usize {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Absolute URL of one page of a collection with `filters` applied.
///
/// Each constrained key becomes one comma-joined parameter; page 1 carries no
/// `page` parameter.
#[must_use]
pub fn page_url(base_url: &Url, handle: &str, filters: &ActiveFilters, page: usize) -> Url {
    let mut url = base_url.clone();

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("collections").push(handle);
    }

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, values) in filters.constraints() {
            let joined = values
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",");
            query.append_pair(key, &joined);
        }
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }

    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

/// Response body of `GET /collections/{handle}`.
#[derive(Debug, Serialize)]
pub struct CollectionPage {
    pub collection: CollectionSummary,
    #[serde(flatten)]
    pub listing: CollectionListing,
    /// Whether the collection holds more products than were fetched.
    pub truncated: bool,
    pub previous_page_url: Option<String>,
    pub next_page_url: Option<String>,
}

impl CollectionPage {
    /// Attach collection metadata and neighbour page links to a listing.
    #[must_use]
    pub fn new(
        collection: CollectionSummary,
        listing: CollectionListing,
        truncated: bool,
        base_url: &Url,
        filters: &ActiveFilters,
    ) -> Self {
        let link = |page: usize| page_url(base_url, &collection.handle, filters, page).to_string();

        let previous_page_url = listing
            .has_previous_page
            .then(|| link(listing.current_page.saturating_sub(1)));
        let next_page_url = listing
            .has_next_page
            .then(|| link(listing.current_page.saturating_add(1)));

        Self {
            collection,
            listing,
            truncated,
            previous_page_url,
            next_page_url,
        }
    }
}

/// Response body of `GET /collections/{handle}/facets`.
#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub handle: String,
    pub facets: Vec<FacetGroup>,
    /// Whether facets from the collection's products are included.
    pub includes_products: bool,
}

/// List collection summaries.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CollectionSummary>>> {
    let collections = state
        .storefront()
        .get_collections(COLLECTIONS_PER_INDEX)
        .await?;

    Ok(Json(collections.to_vec()))
}

/// Filtered, paginated collection listing.
#[instrument(skip(state, params), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<CollectionPage>> {
    let query = CollectionQuery::from_pairs(&params);

    let fetched = state
        .storefront()
        .get_collection_products(&handle, FetchMode::Full)
        .await?;

    let seed = state.seeds().facets_for(&handle);
    let page = PageRequest::new(query.page, state.config().catalog.page_size);
    let listing =
        state
            .filter_caches()
            .listing(&handle, &seed, &fetched.products, &query.filters, page)?;

    let page_number = query.page.to_string();
    add_breadcrumb(
        "catalog",
        "Viewed collection",
        &[("handle", handle.as_str()), ("page", page_number.as_str())],
    );

    Ok(Json(CollectionPage::new(
        fetched.collection,
        listing,
        fetched.truncated,
        &state.config().base_url,
        &query.filters,
    )))
}

/// Instant facets: the seed merged with facets of the newest products.
///
/// Falls back to the seed alone when the products cannot be fetched, so the
/// filter controls can render before the listing.
#[instrument(skip(state, params), fields(handle = %handle))]
pub async fn facets(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<FacetsResponse>> {
    let query = CollectionQuery::from_pairs(&params);
    let seed = state.seeds().facets_for(&handle);

    let (facets, includes_products) = match state
        .storefront()
        .get_collection_products(&handle, FetchMode::Recent)
        .await
    {
        Ok(recent) => (
            merge_facets(&seed, extract_facets(&recent.products, &query.filters)),
            true,
        ),
        Err(ShopifyError::NotFound(what)) => return Err(AppError::NotFound(what)),
        Err(e) => {
            warn!(error = %e, "Failed to fetch recent products, serving seeded facets only");
            (seed, false)
        }
    };

    Ok(Json(FacetsResponse {
        handle,
        facets: facet_groups(&facets, &query.filters),
        includes_products,
    }))
}
