//! Integration tests for the bearings storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Engine and router tests (no network)
//! cargo test -p bearings-integration-tests
//!
//! # Including tests against a running storefront
//! STOREFRONT_TEST_URL=http://localhost:3000 cargo test -p bearings-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `facet_engine` - Seeding, extraction, merging, filtering, caching
//! - `collection_listing` - Query parsing, listing assembly, page links
//! - `storefront_http` - Router and middleware without upstream calls

use bearings_core::CatalogProduct;
use bearings_storefront::config::{CatalogConfig, ShopifyStorefrontConfig, StorefrontConfig};
use secrecy::SecretString;
use url::Url;

/// One bearing with the structured fields and metafields the facets read.
#[must_use]
pub fn bearing(
    id: usize,
    vendor: &str,
    product_type: &str,
    inner_mm: &str,
    width_mm: &str,
) -> CatalogProduct {
    CatalogProduct::new(format!("gid://shopify/Product/{id}"), format!("Lager {id}"))
        .with_vendor(vendor)
        .with_product_type(product_type)
        .with_metafield("innerdiameter", inner_mm)
        .with_metafield("bredd", &format!(r#"{{"value":"{width_mm}","unit":"MILLIMETERS"}}"#))
}

/// A catalog of `n` bearings cycling through vendors, types and sizes.
#[must_use]
pub fn sample_catalog(n: usize) -> Vec<CatalogProduct> {
    const VENDORS: [&str; 3] = ["SKF", "FAG", "NSK"];
    const TYPES: [&str; 2] = ["Spårkullager", "Cylindriska rullager"];
    const WIDTHS: [&str; 4] = ["8", "10", "12", "14"];

    (0..n)
        .map(|i| {
            bearing(
                i,
                VENDORS.get(i % VENDORS.len()).copied().unwrap_or_default(),
                TYPES.get(i % TYPES.len()).copied().unwrap_or_default(),
                &format!("{}", 10 + (i % 5) * 5),
                WIDTHS.get(i % WIDTHS.len()).copied().unwrap_or_default(),
            )
        })
        .collect()
}

/// Configuration whose Storefront API endpoint refuses connections.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: Url::parse("https://lagerbutiken.example/").expect("static base URL must parse"),
        shopify: ShopifyStorefrontConfig {
            // Discard port on loopback: requests fail fast without leaving the host
            store: "127.0.0.1:9".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("test-token"),
        },
        catalog: CatalogConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Base URL of a running storefront for the ignored live tests.
#[must_use]
pub fn storefront_url() -> String {
    std::env::var("STOREFRONT_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
