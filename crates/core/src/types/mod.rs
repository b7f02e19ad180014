//! Catalog types shared by the facet engine and the storefront.

pub mod facet;
pub mod filters;
pub mod metafield;
pub mod product;

pub use facet::{
    FacetGroup, FacetMap, facet_label, is_dimensional, keys, normalize_facet_value,
    sort_facet_values,
};
pub use filters::ActiveFilters;
pub use metafield::{Metafield, MetafieldDecodeError, MetafieldValue};
pub use product::{CatalogProduct, ImageRef, Money};
