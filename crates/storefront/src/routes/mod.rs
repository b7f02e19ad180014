//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (Shopify reachable)
//!
//! # Collections (JSON)
//! GET  /collections                 - Collection summaries
//! GET  /collections/{handle}        - Filtered, paginated listing with facets
//! GET  /collections/{handle}/facets - Instant facets (seed + newest products)
//! ```
//!
//! Listing query parameters: `page` (1-based) and one parameter per facet
//! key with comma-separated values, e.g. `?vendor=SKF,FAG&bredd=10&page=2`.

pub mod collections;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{handle}", get(collections::show))
        .route("/{handle}/facets", get(collections::facets))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Collection routes
        .nest("/collections", collection_routes())
}
