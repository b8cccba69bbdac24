//! Caching for catalog data.
//!
//! - `PageCache`: persisted listing pages keyed by `(offset, limit)`, valid
//!   for one hour after they were written
//! - `DetailCache`: in-memory, read-through cache of detail records by id,
//!   unbounded and never evicted for the life of the process

pub mod detail;
pub mod page;

pub use detail::{DetailCache, LOAD_ERROR_MESSAGE};
pub use page::{page_key, CachedPage, PageCache, CACHE_EXPIRATION_MS};
