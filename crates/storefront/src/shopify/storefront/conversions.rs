//! Conversions from raw Storefront API nodes to catalog types.

use bearings_core::types::product::non_blank;
use bearings_core::{CatalogProduct, ImageRef, Metafield, Money};

use crate::shopify::types::CollectionSummary;

use super::queries::{get_collection_products, get_collections};

// =============================================================================
// get_collection_products conversions
// =============================================================================

pub fn convert_collection_summary(
    collection: &get_collection_products::CollectionNode,
) -> CollectionSummary {
    CollectionSummary {
        id: collection.id.clone(),
        handle: collection.handle.clone(),
        title: collection.title.clone(),
        description: non_blank(collection.description.clone()),
    }
}

pub fn convert_product(product: get_collection_products::ProductNode) -> CatalogProduct {
    CatalogProduct {
        id: product.id,
        handle: product.handle,
        title: product.title,
        vendor: non_blank(product.vendor),
        product_type: non_blank(product.product_type),
        tags: product.tags,
        // Unset identifiers come back as null entries.
        metafields: product
            .metafields
            .into_iter()
            .flatten()
            .map(|m| Metafield::new(m.key, &m.value))
            .collect(),
        available_for_sale: product.available_for_sale,
        price: product.price_range.map(|range| Money {
            amount: range.min_variant_price.amount,
            currency_code: range.min_variant_price.currency_code,
        }),
        image: product.featured_image.map(|image| ImageRef {
            url: image.url,
            alt_text: image.alt_text.and_then(non_blank),
        }),
    }
}

// =============================================================================
// get_collections conversions
// =============================================================================

pub fn convert_collection_node(collection: get_collections::CollectionNode) -> CollectionSummary {
    CollectionSummary {
        id: collection.id,
        handle: collection.handle,
        title: collection.title,
        description: non_blank(collection.description),
    }
}
