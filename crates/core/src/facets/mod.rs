//! Collection facet and pagination engine.
//!
//! The pipeline for one collection request:
//!
//! 1. [`seed`] supplies a static facet catalog so filter controls can render
//!    immediately.
//! 2. [`extract`] derives the facet values present in the fetched products.
//! 3. [`merge`] unions the two.
//! 4. [`predicate`] filters products by the active selections, memoized per
//!    filter combination by [`cache`].
//! 5. [`paginate`] slices the requested page.
//!
//! [`listing::build_listing`] runs the whole pipeline; callers that share a
//! cache between threads use [`listing::filter_for_listing`] and
//! [`listing::assemble_listing`] separately. Everything here is
//! synchronous and free of I/O.

pub mod cache;
pub mod extract;
pub mod listing;
pub mod merge;
pub mod paginate;
pub mod predicate;
pub mod seed;

pub use cache::{DEFAULT_FILTER_CACHE_CAPACITY, FilterCache, FilteredProducts};
pub use extract::extract_facets;
pub use listing::{
    CollectionListing, PageRequest, assemble_listing, build_listing, facet_groups,
    filter_for_listing,
};
pub use merge::merge_facets;
pub use paginate::{DEFAULT_PAGE_SIZE, Page, paginate, total_pages};
pub use predicate::{filter_products, matches};
pub use seed::{DEFAULT_FLAGSHIP_COLLECTION, SeedCatalog, seed_facets};
