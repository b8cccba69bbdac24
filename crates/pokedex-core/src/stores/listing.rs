use std::sync::{Arc, RwLock};

use tracing::{debug, error};

use crate::api::Catalog;
use crate::cache::PageCache;
use crate::error::IntegrityError;
use crate::models::{AllPokemonsResponse, Paginate, SimplePokemon};
use crate::storage::KeyValueStore;
use crate::utils::sync::{read, write};

#[derive(Debug, Default)]
struct ListingState {
    pokemons: Vec<SimplePokemon>,
    pagination: Option<Paginate>,
    is_loading: bool,
}

/// Clears the loading flag on every exit path.
struct LoadingGuard<'a> {
    state: &'a RwLock<ListingState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        write(self.state).is_loading = false;
    }
}

/// Owns the working set shown by the listing view.
///
/// Each `(offset, limit)` page is resolved from the page cache when a valid
/// entry exists and from the catalog otherwise. Transport and persistence
/// failures are logged and leave the state as it was; only malformed catalog
/// data is returned as an error.
pub struct ListingStore<C, S> {
    catalog: Arc<C>,
    pages: PageCache<S>,
    state: RwLock<ListingState>,
}

impl<C: Catalog, S: KeyValueStore> ListingStore<C, S> {
    pub fn new(catalog: Arc<C>, storage: Arc<S>) -> Self {
        Self {
            catalog,
            pages: PageCache::new(storage),
            state: RwLock::new(ListingState::default()),
        }
    }

    /// Current working set
    pub fn pokemons(&self) -> Vec<SimplePokemon> {
        read(&self.state).pokemons.clone()
    }

    pub fn pagination(&self) -> Option<Paginate> {
        read(&self.state).pagination.clone()
    }

    pub fn is_loading(&self) -> bool {
        read(&self.state).is_loading
    }

    /// Replace the working set directly, e.g. when restoring a view
    pub fn set_pokemons(&self, pokemons: Vec<SimplePokemon>) {
        write(&self.state).pokemons = pokemons;
    }

    fn start_loading(&self) -> LoadingGuard<'_> {
        write(&self.state).is_loading = true;
        LoadingGuard { state: &self.state }
    }

    fn persist_page(&self, offset: u32, limit: u32, data: &[SimplePokemon]) {
        if let Err(e) = self.pages.save(offset, limit, data) {
            error!(offset, limit, error = %e, "Failed to save pokemons to cache");
        }
    }

    /// Load one page and make it the whole working set.
    ///
    /// A valid cached page is used as-is and pagination is left untouched.
    pub async fn fetch_all_pokemons(&self, offset: u32, limit: u32) -> Result<(), IntegrityError> {
        if let Some(cached) = self.pages.load(offset, limit) {
            write(&self.state).pokemons = cached;
            return Ok(());
        }

        let _loading = self.start_loading();

        let page = match self.catalog.list_page(offset, limit).await {
            Ok(page) => page,
            Err(e) => {
                error!(offset, limit, error = %e, "Error fetching pokemons");
                return Ok(());
            }
        };
        let response = AllPokemonsResponse::from_page(page, offset, limit)?;
        debug!(offset, limit, count = response.results.len(), "Fetched pokemon page");

        {
            let mut state = write(&self.state);
            state.pokemons = response.results.clone();
            state.pagination = Some(response.pagination);
        }
        self.persist_page(offset, limit, &response.results);

        Ok(())
    }

    /// Load one page and append it to the working set.
    ///
    /// On a cache hit the previous pagination is kept with only `offset` and
    /// `limit` moved to the requested page.
    pub async fn fetch_more_pokemons(&self, offset: u32, limit: u32) -> Result<(), IntegrityError> {
        let _loading = self.start_loading();

        let (new_pokemons, fresh_pagination) = match self.pages.load(offset, limit) {
            Some(cached) => (cached, None),
            None => match self.catalog.list_page(offset, limit).await {
                Ok(page) => {
                    let response = AllPokemonsResponse::from_page(page, offset, limit)?;
                    self.persist_page(offset, limit, &response.results);
                    (response.results, Some(response.pagination))
                }
                Err(e) => {
                    error!(offset, limit, error = %e, "Error fetching more pokemons");
                    return Ok(());
                }
            },
        };
        debug!(offset, limit, count = new_pokemons.len(), "Appending pokemon page");

        let mut state = write(&self.state);
        state.pokemons.extend(new_pokemons);
        match fresh_pagination {
            Some(pagination) => state.pagination = Some(pagination),
            None => {
                if let Some(pagination) = state.pagination.as_mut() {
                    pagination.offset = offset;
                    pagination.limit = limit;
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
