//! GraphQL operations for the Shopify Storefront API.
//!
//! Each operation implements [`GraphQLQuery`] by hand: the variables and
//! response shapes cover only the fields the collection pages read, so no
//! schema codegen is needed.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

/// Metafield namespace holding the bearing attributes.
pub const FACET_METAFIELD_NAMESPACE: &str = "custom";

/// Metafield keys requested for every product.
pub const FACET_METAFIELD_KEYS: &[&str] = &[
    "innerdiameter",
    "ytterdiameter",
    "bredd",
    "material",
    "seal",
    "cage",
    "precision",
    "application",
];

/// Largest page size the Storefront API accepts.
pub const MAX_PAGE_SIZE: i64 = 250;

/// Products fetched for [`FetchMode::Recent`](crate::shopify::FetchMode::Recent).
pub const RECENT_BATCH_SIZE: i64 = 50;

const GET_COLLECTION_PRODUCTS_QUERY: &str = r"
query GetCollectionProducts(
  $handle: String!
  $first: Int!
  $after: String
  $sortKey: ProductCollectionSortKeys
  $reverse: Boolean
  $identifiers: [HasMetafieldsIdentifier!]!
) {
  collection(handle: $handle) {
    id
    handle
    title
    description
    products(first: $first, after: $after, sortKey: $sortKey, reverse: $reverse) {
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        id
        handle
        title
        vendor
        productType
        tags
        availableForSale
        priceRange {
          minVariantPrice {
            amount
            currencyCode
          }
        }
        featuredImage {
          url
          altText
        }
        metafields(identifiers: $identifiers) {
          key
          value
        }
      }
    }
  }
}
";

const GET_COLLECTIONS_QUERY: &str = r"
query GetCollections($first: Int!) {
  collections(first: $first) {
    nodes {
      id
      handle
      title
      description
    }
  }
}
";

/// Products of one collection, one page at a time.
pub struct GetCollectionProducts;

pub mod get_collection_products {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub handle: String,
        pub first: i64,
        pub after: Option<String>,
        pub sort_key: Option<ProductCollectionSortKeys>,
        pub reverse: Option<bool>,
        pub identifiers: Vec<HasMetafieldsIdentifier>,
    }

    #[allow(clippy::upper_case_acronyms, non_camel_case_types)]
    #[derive(Debug, Clone, Copy, Serialize)]
    pub enum ProductCollectionSortKeys {
        COLLECTION_DEFAULT,
        CREATED,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct HasMetafieldsIdentifier {
        pub namespace: String,
        pub key: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionNode {
        pub id: String,
        pub handle: String,
        pub title: String,
        #[serde(default)]
        pub description: String,
        pub products: ProductConnection,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductConnection {
        pub page_info: PageInfo,
        pub nodes: Vec<ProductNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageInfo {
        pub has_next_page: bool,
        pub end_cursor: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductNode {
        pub id: String,
        pub handle: String,
        pub title: String,
        #[serde(default)]
        pub vendor: String,
        #[serde(default)]
        pub product_type: String,
        #[serde(default)]
        pub tags: Vec<String>,
        pub available_for_sale: bool,
        pub price_range: Option<PriceRange>,
        pub featured_image: Option<Image>,
        /// One entry per requested identifier; `null` when unset.
        #[serde(default)]
        pub metafields: Vec<Option<MetafieldNode>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PriceRange {
        pub min_variant_price: MoneyV2,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyV2 {
        pub amount: String,
        pub currency_code: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Image {
        pub url: String,
        pub alt_text: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MetafieldNode {
        pub key: String,
        pub value: String,
    }
}

impl GraphQLQuery for GetCollectionProducts {
    type Variables = get_collection_products::Variables;
    type ResponseData = get_collection_products::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: GET_COLLECTION_PRODUCTS_QUERY,
            operation_name: "GetCollectionProducts",
        }
    }
}

/// Build the metafield identifiers requested with every product.
#[must_use]
pub fn facet_metafield_identifiers() -> Vec<get_collection_products::HasMetafieldsIdentifier> {
    FACET_METAFIELD_KEYS
        .iter()
        .map(|key| get_collection_products::HasMetafieldsIdentifier {
            namespace: FACET_METAFIELD_NAMESPACE.to_string(),
            key: (*key).to_string(),
        })
        .collect()
}

/// Collection summaries.
pub struct GetCollections;

pub mod get_collections {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: CollectionConnection,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionConnection {
        pub nodes: Vec<CollectionNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionNode {
        pub id: String,
        pub handle: String,
        pub title: String,
        #[serde(default)]
        pub description: String,
    }
}

impl GraphQLQuery for GetCollections {
    type Variables = get_collections::Variables;
    type ResponseData = get_collections::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: GET_COLLECTIONS_QUERY,
            operation_name: "GetCollections",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_products_body_serializes_camel_case() {
        let body = GetCollectionProducts::build_query(get_collection_products::Variables {
            handle: "spårkullager".to_string(),
            first: MAX_PAGE_SIZE,
            after: None,
            sort_key: Some(get_collection_products::ProductCollectionSortKeys::CREATED),
            reverse: Some(true),
            identifiers: facet_metafield_identifiers(),
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "GetCollectionProducts");
        assert_eq!(json["variables"]["sortKey"], "CREATED");
        assert_eq!(json["variables"]["first"], 250);
        assert_eq!(
            json["variables"]["identifiers"][0],
            serde_json::json!({"namespace": "custom", "key": "innerdiameter"})
        );
    }

    #[test]
    fn test_collection_products_response_parses_null_metafields() {
        let data: get_collection_products::ResponseData = serde_json::from_value(serde_json::json!({
            "collection": {
                "id": "gid://shopify/Collection/1",
                "handle": "spårkullager",
                "title": "Spårkullager",
                "description": "",
                "products": {
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "nodes": [{
                        "id": "gid://shopify/Product/1",
                        "handle": "6204-2rs",
                        "title": "6204-2RS",
                        "vendor": "SKF",
                        "productType": "Spårkullager",
                        "tags": ["seal:2RS"],
                        "availableForSale": true,
                        "priceRange": { "minVariantPrice": { "amount": "89.0", "currencyCode": "SEK" } },
                        "featuredImage": null,
                        "metafields": [{ "key": "innerdiameter", "value": "20" }, null]
                    }]
                }
            }
        }))
        .unwrap();

        let collection = data.collection.unwrap();
        let node = collection.products.nodes.first().unwrap();
        assert_eq!(node.metafields.len(), 2);
        assert!(node.metafields.get(1).unwrap().is_none());
    }
}
