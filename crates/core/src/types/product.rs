//! Catalog product records as seen by the facet engine.

use serde::{Deserialize, Serialize};

use super::metafield::Metafield;

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

/// Product image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// CDN URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// A product normalized at the data-source boundary.
///
/// `vendor` and `product_type` are `None` when upstream returned an empty
/// string, so the facet code never has to care about blank values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Shopify product GID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Manufacturer.
    pub vendor: Option<String>,
    /// Product type, e.g. "Spårkullager".
    pub product_type: Option<String>,
    /// Tags, some of them encoded as `key:value`.
    pub tags: Vec<String>,
    /// Metafields requested for the collection.
    pub metafields: Vec<Metafield>,
    /// Whether any variant can be purchased.
    pub available_for_sale: bool,
    /// Lowest variant price.
    pub price: Option<Money>,
    /// Featured image.
    pub image: Option<ImageRef>,
}

impl CatalogProduct {
    /// Create a product with only an ID and title; everything else empty.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handle: String::new(),
            title: title.into(),
            vendor: None,
            product_type: None,
            tags: Vec::new(),
            metafields: Vec::new(),
            available_for_sale: true,
            price: None,
            image: None,
        }
    }

    /// Set the vendor.
    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = non_blank(vendor.into());
        self
    }

    /// Set the product type.
    #[must_use]
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = non_blank(product_type.into());
        self
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append a metafield from its raw upstream value.
    #[must_use]
    pub fn with_metafield(mut self, key: impl Into<String>, raw_value: &str) -> Self {
        self.metafields.push(Metafield::new(key, raw_value));
        self
    }

    /// Iterate over the `key:value` encoded tags as trimmed pairs.
    ///
    /// Tags are split on the first `:`. Tags with an empty key or value are
    /// skipped.
    pub fn tag_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().filter_map(|tag| split_tag(tag))
    }
}

/// Split a `key:value` tag into its trimmed parts.
#[must_use]
pub fn split_tag(tag: &str) -> Option<(&str, &str)> {
    let (key, value) = tag.split_once(':')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Map blank strings to `None`.
#[must_use]
pub fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tag() {
        assert_eq!(split_tag("vendor:SKF"), Some(("vendor", "SKF")));
        assert_eq!(split_tag(" bredd : 12 "), Some(("bredd", "12")));
        assert_eq!(split_tag("seal:2RS:extra"), Some(("seal", "2RS:extra")));
        assert_eq!(split_tag("nyhet"), None);
        assert_eq!(split_tag("vendor:"), None);
        assert_eq!(split_tag(":SKF"), None);
    }

    #[test]
    fn test_tag_pairs_skips_plain_tags() {
        let product = CatalogProduct::new("gid://shopify/Product/1", "6204-2RS")
            .with_tag("nyhet")
            .with_tag("material:Kromstål")
            .with_tag("seal:2RS");

        let pairs: Vec<_> = product.tag_pairs().collect();
        assert_eq!(pairs, vec![("material", "Kromstål"), ("seal", "2RS")]);
    }

    #[test]
    fn test_blank_vendor_is_none() {
        let product = CatalogProduct::new("gid://shopify/Product/1", "6204").with_vendor("  ");
        assert!(product.vendor.is_none());
    }
}
