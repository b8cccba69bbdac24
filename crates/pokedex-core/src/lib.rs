//! Core library for pokedex.
//!
//! Data and cache layer for browsing the public Pokemon catalog:
//!
//! - `api`: HTTP client for the paged collection and detail endpoints
//! - `cache`: persisted listing pages with a one-hour window, and an
//!   in-memory detail cache
//! - `stores`: the listing working set and the favorites list
//! - `storage`: the durable key-value capability the caches and stores use
//! - `app`: view-state coordinator reacting to UI events

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod stores;
pub mod utils;

#[cfg(test)]
mod testing;

pub use api::{ApiError, Catalog, CatalogClient};
pub use app::{App, Tab};
pub use cache::{DetailCache, PageCache};
pub use config::Config;
pub use error::{IntegrityError, StorageError};
pub use models::{Paginate, Pokemon, SimplePokemon};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use stores::{FavoritesStore, ListingStore};
