//! Bearings Core - catalog types and the collection facet engine.
//!
//! This crate is shared by:
//! - `storefront` - Public-facing collection pages and facet API
//! - `integration-tests` - End-to-end engine scenarios
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Product data is normalized into [`CatalogProduct`] by the caller
//! before it reaches the engine.
//!
//! # Modules
//!
//! - [`types`] - Products, metafield values, facet keys, active filters
//! - [`facets`] - Seeding, extraction, merging, filtering, caching, pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod facets;
pub mod types;

pub use types::*;
