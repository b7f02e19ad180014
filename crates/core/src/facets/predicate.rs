//! Decide which products satisfy the active filters.

use std::collections::BTreeSet;

use crate::types::facet::{keys, normalize_facet_value};
use crate::types::{ActiveFilters, CatalogProduct};

/// Whether `product` satisfies every constrained facet key in `filters`.
///
/// Within one key the product passes if any source carries a selected value:
/// a metafield with that key, the structured vendor (key `vendor`), the
/// structured product type (key `productType`), or a `key:value` tag. Every
/// constrained key must pass. Keys with an empty selection are ignored.
///
/// Product values are compared in their [`normalize_facet_value`] form, the
/// same form extraction offers, so every offered value is selectable.
#[must_use]
pub fn matches(product: &CatalogProduct, filters: &ActiveFilters) -> bool {
    filters
        .constraints()
        .all(|(key, selected)| matches_key(product, key, selected))
}

fn matches_key(product: &CatalogProduct, key: &str, selected: &BTreeSet<String>) -> bool {
    let is_selected = |value: &str| {
        normalize_facet_value(key, value).is_some_and(|value| selected.contains(&*value))
    };

    let metafield_match = product
        .metafields
        .iter()
        .any(|m| m.key == key && is_selected(m.display_value()));

    let field_match = match key {
        keys::VENDOR => product.vendor.as_deref(),
        keys::PRODUCT_TYPE => product.product_type.as_deref(),
        _ => None,
    }
    .is_some_and(is_selected);

    let tag_match = product
        .tag_pairs()
        .any(|(tag_key, value)| tag_key == key && is_selected(value));

    metafield_match || field_match || tag_match
}

/// Keep the products that match `filters`, preserving input order.
#[must_use]
pub fn filter_products(products: &[CatalogProduct], filters: &ActiveFilters) -> Vec<CatalogProduct> {
    products
        .iter()
        .filter(|product| matches(product, filters))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[CatalogProduct]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn catalog() -> Vec<CatalogProduct> {
        vec![
            CatalogProduct::new("1", "6204-2RS")
                .with_vendor("SKF")
                .with_product_type("Spårkullager")
                .with_metafield("innerdiameter", r#"{"value":"20","unit":"MILLIMETERS"}"#)
                .with_tag("seal:2RS"),
            CatalogProduct::new("2", "6001-ZZ")
                .with_vendor("FAG")
                .with_product_type("Spårkullager")
                .with_metafield("innerdiameter", "12")
                .with_tag("seal:ZZ"),
            CatalogProduct::new("3", "NU205")
                .with_vendor("NSK")
                .with_product_type("Cylindriska rullager")
                .with_metafield("innerdiameter", "25"),
            CatalogProduct::new("4", "6204-Z")
                .with_tag("vendor:SKF")
                .with_metafield("innerdiameter", "20"),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let products = catalog();
        let filtered = filter_products(&products, &ActiveFilters::new());
        assert_eq!(filtered, products);
    }

    #[test]
    fn test_all_empty_selections_return_everything() {
        let products = catalog();
        let filters = ActiveFilters::new()
            .with("vendor", Vec::<String>::new())
            .with("seal", Vec::<String>::new());
        assert_eq!(filter_products(&products, &filters).len(), products.len());
    }

    #[test]
    fn test_or_within_key() {
        let filters = ActiveFilters::new().with("vendor", ["FAG", "NSK"]);
        assert_eq!(ids(&filter_products(&catalog(), &filters)), vec!["2", "3"]);
    }

    #[test]
    fn test_and_across_keys() {
        let filters = ActiveFilters::new()
            .with("productType", ["Spårkullager"])
            .with("innerdiameter", ["20"]);
        assert_eq!(ids(&filter_products(&catalog(), &filters)), vec!["1"]);
    }

    #[test]
    fn test_wrapped_metafield_matches_display_value() {
        let filters = ActiveFilters::new().with("innerdiameter", ["20"]);
        assert_eq!(ids(&filter_products(&catalog(), &filters)), vec!["1", "4"]);
    }

    #[test]
    fn test_vendor_tag_matches_without_structured_vendor() {
        let filters = ActiveFilters::new().with("vendor", ["SKF"]);
        assert_eq!(ids(&filter_products(&catalog(), &filters)), vec!["1", "4"]);
    }

    #[test]
    fn test_vendor_tag_matches_when_structured_vendor_differs() {
        let product = CatalogProduct::new("5", "Import")
            .with_vendor("Generic")
            .with_tag("vendor:SKF");
        let filters = ActiveFilters::new().with("vendor", ["SKF"]);
        assert!(matches(&product, &filters));
    }

    #[test]
    fn test_product_without_signal_is_excluded() {
        let filters = ActiveFilters::new().with("seal", ["2RS", "ZZ"]);
        assert_eq!(ids(&filter_products(&catalog(), &filters)), vec!["1", "2"]);
    }

    #[test]
    fn test_unknown_value_matches_nothing() {
        let filters = ActiveFilters::new().with("vendor", ["Timken"]);
        assert!(filter_products(&catalog(), &filters).is_empty());
    }

    #[test]
    fn test_filter_is_order_preserving_subsequence() {
        let products = catalog();
        let filters = ActiveFilters::new().with("productType", ["Spårkullager", "Cylindriska rullager"]);
        let filtered = filter_products(&products, &filters);

        let mut remaining = products.iter();
        for kept in &filtered {
            assert!(remaining.any(|p| p == kept), "{} out of order", kept.id);
        }
    }

    #[test]
    fn test_decimal_comma_matches_point_selection() {
        let product = CatalogProduct::new("6", "61800")
            .with_metafield("bredd", r#"{"value":"2,5","unit":"MILLIMETERS"}"#);

        let point = ActiveFilters::new().with("bredd", ["2.5"]);
        assert!(matches(&product, &point));

        // "2,5" in a query string means the two selections 2 and 5
        let split = ActiveFilters::from_query_pairs([("bredd", "2,5")]);
        assert!(!matches(&product, &split));
    }

    #[test]
    fn test_padded_values_compare_trimmed() {
        let product = CatalogProduct::new("7", "6204")
            .with_vendor(" SKF ")
            .with_metafield("seal", "2RS  ");
        let filters = ActiveFilters::new()
            .with("vendor", ["SKF"])
            .with("seal", ["2RS"]);
        assert!(matches(&product, &filters));
    }

}
