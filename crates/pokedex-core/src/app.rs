//! Session coordinator for the search view.
//!
//! `App` wires the listing, detail and favorites stores together and turns
//! the presentation layer's events (search changed, tab changed, item
//! selected, modal closed, favorite toggled) into plain method calls. It
//! holds only view state; all data lives in the stores.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::Catalog;
use crate::cache::DetailCache;
use crate::config::Config;
use crate::error::IntegrityError;
use crate::models::{Pokemon, SimplePokemon};
use crate::storage::KeyValueStore;
use crate::stores::{FavoritesStore, ListingStore};
use crate::utils::contains_ignore_case;

/// Listing tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Favorites,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Favorites => "Favorites",
        }
    }
}

pub struct App<C, S> {
    pub config: Config,
    listing: ListingStore<C, S>,
    details: DetailCache<C>,
    favorites: FavoritesStore<S>,

    search_query: String,
    active_tab: Tab,
    selected: Option<SimplePokemon>,
}

impl<C: Catalog, S: KeyValueStore> App<C, S> {
    pub fn new(config: Config, catalog: Arc<C>, storage: Arc<S>) -> Self {
        Self {
            config,
            listing: ListingStore::new(Arc::clone(&catalog), Arc::clone(&storage)),
            details: DetailCache::new(catalog),
            favorites: FavoritesStore::new(storage),
            search_query: String::new(),
            active_tab: Tab::default(),
            selected: None,
        }
    }

    pub fn listing(&self) -> &ListingStore<C, S> {
        &self.listing
    }

    pub fn details(&self) -> &DetailCache<C> {
        &self.details
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Load favorites, then the first page of the listing.
    pub async fn start(&self) -> Result<(), IntegrityError> {
        info!(page_size = self.config.page_size, "Starting pokedex session");
        self.favorites.initialize();
        self.listing
            .fetch_all_pokemons(0, self.config.page_size)
            .await
    }

    // =========================================================================
    // View events
    // =========================================================================

    pub fn on_search(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    pub fn on_tab_change(&mut self, tab: Tab) {
        debug!(tab = tab.title(), "Tab changed");
        self.active_tab = tab;
    }

    pub fn on_pokemon_selected(&mut self, pokemon: SimplePokemon) {
        debug!(id = pokemon.id, name = %pokemon.name, "Pokemon selected");
        self.selected = Some(pokemon);
    }

    pub fn on_modal_closed(&mut self) {
        self.selected = None;
    }

    pub fn is_modal_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_pokemon(&self) -> Option<&SimplePokemon> {
        self.selected.as_ref()
    }

    /// Remove `id` from favorites if present, otherwise add the matching entry.
    pub fn on_toggle_favorite(&mut self, id: u32) {
        if self.favorites.is_favorite(id) {
            self.favorites.remove_favorite(id);
            return;
        }

        let pokemon = self
            .selected
            .clone()
            .filter(|p| p.id == id)
            .or_else(|| self.listing.pokemons().into_iter().find(|p| p.id == id));

        match pokemon {
            Some(pokemon) => self.favorites.add_favorite(&pokemon),
            None => warn!(id, "Cannot favorite a pokemon that is not loaded"),
        }
    }

    /// Reset search and return to the full listing
    pub fn go_home(&mut self) {
        self.search_query.clear();
        self.active_tab = Tab::All;
    }

    // =========================================================================
    // Derived view data
    // =========================================================================

    /// Entries for the active tab, filtered by the search query.
    pub fn displayed_pokemons(&self) -> Vec<SimplePokemon> {
        let mut source = match self.active_tab {
            Tab::All => self.listing.pokemons(),
            Tab::Favorites => self.favorites.favorites(),
        };

        let query = self.search_query.trim().to_lowercase();
        if !query.is_empty() {
            source.retain(|p| contains_ignore_case(&p.name, &query));
        }
        source
    }

    pub fn has_no_results(&self) -> bool {
        !self.listing.is_loading() && self.displayed_pokemons().is_empty()
    }

    // =========================================================================
    // Data loading
    // =========================================================================

    /// Append the page after the current one. Returns whether a fetch ran.
    pub async fn load_more(&self) -> Result<bool, IntegrityError> {
        if self.active_tab != Tab::All || self.listing.is_loading() {
            return Ok(false);
        }

        let Some(pagination) = self.listing.pagination() else {
            return Ok(false);
        };
        if !pagination.has_next() {
            debug!("No more pages to load");
            return Ok(false);
        }

        self.listing
            .fetch_more_pokemons(pagination.next_offset(), pagination.limit)
            .await?;
        Ok(true)
    }

    /// Load `pages` consecutive pages starting at `offset` into the working set.
    ///
    /// Follows pagination while it is known. Pages served from the page cache
    /// leave pagination unset, in which case the next page is addressed by
    /// `offset + n * limit` directly.
    pub async fn load_pages(&self, offset: u32, limit: u32, pages: u32) -> Result<(), IntegrityError> {
        self.listing.fetch_all_pokemons(offset, limit).await?;

        for n in 1..pages {
            let next_offset = match self.listing.pagination() {
                Some(pagination) if !pagination.has_next() => break,
                Some(pagination) => pagination.next_offset(),
                None => offset.saturating_add(n.saturating_mul(limit)),
            };
            self.listing.fetch_more_pokemons(next_offset, limit).await?;
        }
        Ok(())
    }

    /// Detail record for the open modal, if any.
    pub async fn selected_details(&self) -> Option<Pokemon> {
        let id = self.selected.as_ref()?.id;
        self.details.fetch_pokemon_data(id).await
    }
}

// ============================================================================
// Tests
// ============================================================================
