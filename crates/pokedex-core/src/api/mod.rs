//! HTTP client module for the Pokemon catalog API.
//!
//! This module provides `CatalogClient` for fetching pages of the
//! collection and individual detail records, plus the `Catalog` trait the
//! caches and stores are written against.
//!
//! The catalog is public and read-only, so requests carry no credentials.

pub mod client;
pub mod error;

pub use client::{Catalog, CatalogClient, API_BASE_URL, DEFAULT_LIMIT, REQUEST_TIMEOUT_MS};
pub use error::ApiError;
