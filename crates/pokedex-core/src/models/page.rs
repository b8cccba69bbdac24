//! Paging metadata and the collection endpoint's page shape.

use serde::{Deserialize, Serialize};

use super::{ListingEntry, SimplePokemon};
use crate::error::IntegrityError;
use crate::utils::add_ids;

/// Pagination state for the listing.
/// `next`/`previous` are opaque absolute URLs, `None` at the boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginate {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Paginate {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Offset of the page following this one
    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit)
    }
}

/// Body of `GET /pokemon?offset=&limit=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ListingEntry>,
}

/// One resolved page: pagination plus id-enriched entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllPokemonsResponse {
    #[serde(flatten)]
    pub pagination: Paginate,
    pub results: Vec<SimplePokemon>,
}

impl AllPokemonsResponse {
    /// Enrich a raw page requested with `offset`/`limit`.
    pub fn from_page(page: PokemonPage, offset: u32, limit: u32) -> Result<Self, IntegrityError> {
        Ok(Self {
            pagination: Paginate {
                count: page.count,
                next: page.next,
                previous: page.previous,
                limit,
                offset,
            },
            results: add_ids(page.results)?,
        })
    }
}
