//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - `graphql_client` request/response envelopes, `reqwest` for HTTP
//! - Products are read live from the Storefront API; nothing is persisted
//! - In-memory caching via `moka` for fetched product lists (5 minute TTL)
//! - Raw GraphQL nodes are normalized into [`bearings_core::CatalogProduct`]
//!   in one place (`storefront::conversions`), so the facet engine never
//!   sees upstream shapes
//!
//! # Example
//!
//! ```rust,ignore
//! use bearings_storefront::shopify::{FetchMode, StorefrontClient};
//!
//! let client = StorefrontClient::new(&config.shopify, config.catalog.max_products);
//!
//! // Newest products only, for instant facets
//! let recent = client.get_collection_products("spårkullager", FetchMode::Recent).await?;
//!
//! // Every product in the collection, for filtering
//! let all = client.get_collection_products("spårkullager", FetchMode::Full).await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::StorefrontClient;
pub use types::*;

use std::fmt;

use thiserror::Error;

/// Failure talking to the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 429; carries the `Retry-After` seconds.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

impl GraphQLError {
    /// An error synthesized locally rather than reported by Shopify.
    #[must_use]
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
        }
    }
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(error: graphql_client::Error) -> Self {
        let locations = error
            .locations
            .unwrap_or_default()
            .into_iter()
            .map(|l| GraphQLErrorLocation {
                line: i64::from(l.line),
                column: i64::from(l.column),
            })
            .collect();

        let path = error
            .path
            .unwrap_or_default()
            .into_iter()
            .map(|fragment| match fragment {
                graphql_client::PathFragment::Key(key) => serde_json::Value::String(key),
                graphql_client::PathFragment::Index(index) => serde_json::Value::from(index),
            })
            .collect();

        Self {
            message: error.message,
            locations,
            path,
        }
    }
}

impl fmt::Display for GraphQLError {
    /// `message path: a.b at line L:C`, omitting the parts that are absent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(3);

        if !self.message.is_empty() {
            parts.push(self.message.clone());
        }
        if !self.path.is_empty() {
            let segments: Vec<String> = self
                .path
                .iter()
                .map(|segment| {
                    segment
                        .as_str()
                        .map_or_else(|| segment.to_string(), str::to_string)
                })
                .collect();
            parts.push(format!("path: {}", segments.join(".")));
        }
        if let Some(location) = self.locations.first() {
            parts.push(format!("at line {}:{}", location.line, location.column));
        }

        f.write_str(&parts.join(" "))
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, error)| {
            let rendered = error.to_string();
            if rendered.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                rendered
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_collection_display() {
        let err = ShopifyError::NotFound("Collection not found: spårkullager".to_string());
        assert_eq!(err.to_string(), "Not found: Collection not found: spårkullager");
    }

    #[test]
    fn test_errors_joined_in_order() {
        let err = ShopifyError::GraphQL(vec![
            GraphQLError::local("Field 'metafields' doesn't exist"),
            GraphQLError::local("Throttled"),
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'metafields' doesn't exist; Throttled"
        );
    }

    #[test]
    fn test_from_graphql_client_error() {
        let raw: graphql_client::Error = serde_json::from_value(serde_json::json!({
            "message": "",
            "locations": [{ "line": 12, "column": 7 }, { "line": 40, "column": 3 }],
            "path": ["collection", "products", "nodes", 3]
        }))
        .expect("fixture must parse");

        let error = GraphQLError::from(raw);

        assert_eq!(error.locations.len(), 2);
        assert_eq!(
            error.to_string(),
            "path: collection.products.nodes.3 at line 12:7"
        );
    }

    #[test]
    fn test_error_without_details() {
        let err = ShopifyError::GraphQL(vec![GraphQLError::local("")]);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");

        let err = ShopifyError::GraphQL(Vec::new());
        assert_eq!(err.to_string(), "GraphQL errors: (no error details provided)");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ShopifyError::RateLimited(2);
        assert_eq!(err.to_string(), "Rate limited, retry after 2 seconds");
    }
}
