use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, error};

use crate::api::Catalog;
use crate::models::Pokemon;
use crate::utils::sync::{lock, read, write};

/// Message surfaced to the UI when a detail record cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load Pokemon data";

#[derive(Debug, Default)]
struct LoadStatus {
    is_loading: bool,
    error: Option<String>,
}

/// Clears the loading flag on every exit path, including a dropped future.
struct LoadingGuard<'a> {
    status: &'a Mutex<LoadStatus>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.status).is_loading = false;
    }
}

/// Read-through cache of detail records keyed by id.
///
/// Entries live until the process exits. Concurrent fetches of the same
/// uncached id are not coalesced: each one goes to the network and the last
/// to finish overwrites the entry.
pub struct DetailCache<C> {
    catalog: Arc<C>,
    entries: RwLock<HashMap<u32, Pokemon>>,
    status: Mutex<LoadStatus>,
}

impl<C: Catalog> DetailCache<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            entries: RwLock::new(HashMap::new()),
            status: Mutex::new(LoadStatus::default()),
        }
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.status).is_loading
    }

    /// Message from the last failed fetch, cleared when a new fetch starts
    pub fn error(&self) -> Option<String> {
        lock(&self.status).error.clone()
    }

    pub fn add_to_cache(&self, pokemon: Pokemon) {
        write(&self.entries).insert(pokemon.id, pokemon);
    }

    pub fn get_from_cache(&self, id: u32) -> Option<Pokemon> {
        read(&self.entries).get(&id).cloned()
    }

    pub fn has_in_cache(&self, id: u32) -> bool {
        read(&self.entries).contains_key(&id)
    }

    pub fn len(&self) -> usize {
        read(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the detail record for `id`, fetching it on a miss.
    ///
    /// `None` means the record could not be loaded (see [`Self::error`]),
    /// not that it does not exist.
    pub async fn fetch_pokemon_data(&self, id: u32) -> Option<Pokemon> {
        {
            let mut status = lock(&self.status);
            status.is_loading = true;
            status.error = None;
        }
        let _loading = LoadingGuard {
            status: &self.status,
        };

        if let Some(pokemon) = self.get_from_cache(id) {
            debug!(id, "Detail cache hit");
            return Some(pokemon);
        }

        match self.catalog.get_detail(id).await {
            Ok(pokemon) => {
                debug!(id, name = %pokemon.name, "Fetched pokemon details");
                self.add_to_cache(pokemon.clone());
                Some(pokemon)
            }
            Err(e) => {
                error!(id, error = %e, "Failed to load pokemon details");
                lock(&self.status).error = Some(LOAD_ERROR_MESSAGE.to_string());
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
