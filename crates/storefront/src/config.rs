//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_PRIVATE_TOKEN` - Storefront API private access token
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `CATALOG_FLAGSHIP_COLLECTION` - Collection seeded with every facet (default: alla-lager)
//! - `CATALOG_PAGE_SIZE` - Products per collection page (default: 48)
//! - `CATALOG_FILTER_CACHE_CAPACITY` - Filter combinations cached per collection (default: 100)
//! - `CATALOG_MAX_PRODUCTS` - Cap on products fetched per collection (default: 5000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use bearings_core::facets::{
    DEFAULT_FILTER_CACHE_CAPACITY, DEFAULT_FLAGSHIP_COLLECTION, DEFAULT_PAGE_SIZE,
};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_VERSION: &str = "2026-01";
const DEFAULT_MAX_PRODUCTS: usize = 5000;

/// Storefront tokens issued by Shopify sit well above this.
const MIN_TOKEN_ENTROPY: f64 = 3.3;

/// Fragments that betray a token copied from a template (matched lowercase).
const PLACEHOLDER_FRAGMENTS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "dummy",
    "token-here",
    "xxx",
    "todo",
    "insert",
    "paste",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL, used for pagination links
    pub base_url: Url,
    pub shopify: ShopifyStorefrontConfig,
    pub catalog: CatalogConfig,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Storefront API configuration.
///
/// `Debug` is written by hand so the token never reaches a log line.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Store domain, or `host:port` for a local stand-in
    pub store: String,
    pub api_version: String,
    /// Storefront API private access token (server-side only)
    pub storefront_private_token: SecretString,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_private_token", &"[REDACTED]")
            .finish()
    }
}

/// Collection listing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Collection handle that receives the full seeded facet catalog
    pub flagship_collection: String,
    /// Products per page
    pub page_size: usize,
    /// Filter combinations memoized per collection
    pub filter_cache_capacity: usize,
    /// Upper bound on products fetched for one collection
    pub max_products: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            flagship_collection: DEFAULT_FLAGSHIP_COLLECTION.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            filter_cache_capacity: DEFAULT_FILTER_CACHE_CAPACITY,
            max_products: DEFAULT_MAX_PRODUCTS,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from the process environment, after merging in a
    /// `.env` file when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal production case
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any variable source.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Vars(lookup);

        Ok(Self {
            host: env.parsed("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: env.parsed("STOREFRONT_PORT", 3000)?,
            base_url: parse_base_url(&env.required("STOREFRONT_BASE_URL")?)?,
            shopify: ShopifyStorefrontConfig {
                store: env.required("SHOPIFY_STORE")?,
                api_version: env
                    .optional("SHOPIFY_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                storefront_private_token: env.token("SHOPIFY_STOREFRONT_PRIVATE_TOKEN")?,
            },
            catalog: CatalogConfig::from_vars(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parsed("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: env.parsed("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_vars<F: Fn(&str) -> Option<String>>(env: &Vars<F>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            flagship_collection: env
                .optional("CATALOG_FLAGSHIP_COLLECTION")
                .unwrap_or(defaults.flagship_collection),
            page_size: env.parsed("CATALOG_PAGE_SIZE", defaults.page_size)?,
            filter_cache_capacity: env
                .parsed("CATALOG_FILTER_CACHE_CAPACITY", defaults.filter_cache_capacity)?,
            max_products: env.parsed("CATALOG_MAX_PRODUCTS", defaults.max_products)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("CATALOG_PAGE_SIZE", self.page_size),
            ("CATALOG_FILTER_CACHE_CAPACITY", self.filter_cache_capacity),
            ("CATALOG_MAX_PRODUCTS", self.max_products),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    "must be greater than zero".to_string(),
                ));
            }
        }
        if self.flagship_collection.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_FLAGSHIP_COLLECTION".to_string(),
                "must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Variable access
// =============================================================================

/// Typed reads over a variable lookup. Blank values count as unset.
struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    fn token(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        check_token_strength(&value)
            .map_err(|reason| ConfigError::InsecureSecret(key.to_string(), reason))?;
        Ok(SecretString::from(value))
    }
}

/// Parse the public base URL; it must be an absolute http(s) URL.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), reason);

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid("must be an http(s) URL with a host".to_string()));
    }
    Ok(url)
}

/// Shannon entropy in bits per character.
fn bits_per_char(s: &str) -> f64 {
    let mut counts: HashMap<char, u32> = HashMap::new();
    let mut total = 0_u32;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        total = total.saturating_add(1);
    }
    if total == 0 {
        return 0.0;
    }

    let total = f64::from(total);
    counts
        .values()
        .map(|&count| {
            let p = f64::from(count) / total;
            -p * p.log2()
        })
        .sum()
}

/// Reject tokens that look copied from a template or typed by hand.
fn check_token_strength(token: &str) -> Result<(), String> {
    let lower = token.to_lowercase();
    if let Some(fragment) = PLACEHOLDER_FRAGMENTS.iter().find(|f| lower.contains(*f)) {
        return Err(format!("looks like a placeholder (contains '{fragment}')"));
    }

    let entropy = bits_per_char(token);
    if entropy < MIN_TOKEN_ENTROPY {
        return Err(format!(
            "entropy {entropy:.2} bits/char is below {MIN_TOKEN_ENTROPY:.1}; use the token issued in the Shopify admin"
        ));
    }
    Ok(())
}
