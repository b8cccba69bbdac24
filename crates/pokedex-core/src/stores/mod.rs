//! Stateful stores the presentation layer reads from and calls into.
//!
//! - `ListingStore`: the accumulated working set of listing entries plus
//!   pagination, backed by the persisted page cache
//! - `FavoritesStore`: the user's favorites, persisted in full on every change

pub mod favorites;
pub mod listing;

pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use listing::ListingStore;
