use std::sync::{Arc, RwLock};

use tracing::{debug, error};

use crate::models::SimplePokemon;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::utils::sync::{read, write};

/// Storage key for the favorites list
pub const FAVORITES_KEY: &str = "pokemon_favorites";

/// The user's favorites, deduplicated by id in insertion order.
///
/// The in-memory list is authoritative for the session. Every change writes
/// the whole list back while still holding the list lock, so persisted
/// snapshots land in mutation order. A failed write is logged and otherwise
/// ignored.
pub struct FavoritesStore<S> {
    storage: Arc<S>,
    favorites: RwLock<Vec<SimplePokemon>>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Create an empty store. Call [`Self::initialize`] before trusting its contents.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            favorites: RwLock::new(Vec::new()),
        }
    }

    /// Load the persisted list. Failures are logged and leave the list empty.
    pub fn initialize(&self) {
        match load_json::<Vec<SimplePokemon>, _>(self.storage.as_ref(), FAVORITES_KEY) {
            Ok(Some(stored)) => {
                debug!(count = stored.len(), "Loaded favorites");
                *write(&self.favorites) = stored;
            }
            Ok(None) => debug!("No stored favorites"),
            Err(e) => error!(error = %e, "Error loading favorites"),
        }
    }

    pub fn favorites(&self) -> Vec<SimplePokemon> {
        read(&self.favorites).clone()
    }

    pub fn len(&self) -> usize {
        read(&self.favorites).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `pokemon` unless an entry with the same id exists.
    pub fn add_favorite(&self, pokemon: &SimplePokemon) {
        let mut favorites = write(&self.favorites);
        if favorites.iter().any(|fav| fav.id == pokemon.id) {
            return;
        }
        favorites.push(pokemon.clone());
        self.save(&favorites);
    }

    /// Remove the entry with `id`. Absent ids leave the store untouched.
    pub fn remove_favorite(&self, id: impl Into<Option<u32>>) {
        let Some(id) = id.into() else {
            return;
        };
        let mut favorites = write(&self.favorites);
        let before = favorites.len();
        favorites.retain(|fav| fav.id != id);
        if favorites.len() == before {
            return;
        }
        self.save(&favorites);
    }

    pub fn is_favorite(&self, id: impl Into<Option<u32>>) -> bool {
        match id.into() {
            Some(id) => read(&self.favorites).iter().any(|fav| fav.id == id),
            None => false,
        }
    }

    fn save(&self, favorites: &[SimplePokemon]) {
        match save_json(self.storage.as_ref(), FAVORITES_KEY, favorites) {
            Ok(()) => debug!(count = favorites.len(), "Saved favorites"),
            Err(e) => error!(error = %e, "Error saving favorites"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::entry;

    fn new_store() -> (FavoritesStore<MemoryStore>, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (FavoritesStore::new(Arc::clone(&storage)), storage)
    }

    #[test]
    fn test_starts_empty() {
        let (store, _) = new_store();
        store.initialize();
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_add_favorite_persists_full_list() {
        let (store, storage) = new_store();
        let bulbasaur = entry(1, "Bulbasaur");

        store.add_favorite(&bulbasaur);

        assert_eq!(store.favorites(), vec![bulbasaur.clone()]);
        assert_eq!(
            storage.writes_for(FAVORITES_KEY),
            vec![serde_json::to_string(&vec![bulbasaur]).unwrap()]
        );
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let (store, storage) = new_store();
        let bulbasaur = entry(1, "Bulbasaur");

        store.add_favorite(&bulbasaur);
        store.add_favorite(&bulbasaur);

        assert_eq!(store.len(), 1);
        assert_eq!(storage.writes_for(FAVORITES_KEY).len(), 1);
    }

    #[test]
    fn test_remove_favorite() {
        let (store, storage) = new_store();
        let bulbasaur = entry(1, "Bulbasaur");

        store.add_favorite(&bulbasaur);
        store.remove_favorite(bulbasaur.id);

        assert!(store.is_empty());
        assert_eq!(storage.writes_for(FAVORITES_KEY).last().map(String::as_str), Some("[]"));
    }

    #[test]
    fn test_remove_absent_or_missing_id_is_noop() {
        let (store, storage) = new_store();
        store.add_favorite(&entry(1, "Bulbasaur"));

        store.remove_favorite(2);
        store.remove_favorite(None);

        assert_eq!(store.len(), 1);
        assert_eq!(storage.writes_for(FAVORITES_KEY).len(), 1);
    }

    #[test]
    fn test_is_favorite() {
        let (store, _) = new_store();
        store.add_favorite(&entry(1, "Bulbasaur"));

        assert!(store.is_favorite(1));
        assert!(!store.is_favorite(2));
        assert!(!store.is_favorite(None));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (store, storage) = new_store();
        store.add_favorite(&entry(25, "pikachu"));
        store.add_favorite(&entry(1, "bulbasaur"));
        store.add_favorite(&entry(7, "squirtle"));
        store.remove_favorite(1);

        let ids: Vec<u32> = store.favorites().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![25, 7]);

        let last: Vec<SimplePokemon> =
            serde_json::from_str(storage.writes_for(FAVORITES_KEY).last().unwrap()).unwrap();
        assert_eq!(last, store.favorites());
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let (store, storage) = new_store();
        storage.set_fail_writes(true);

        store.add_favorite(&entry(1, "Bulbasaur"));

        assert!(store.is_favorite(1));
        assert!(storage.writes().is_empty());
    }

    #[test]
    fn test_initialize_restores_persisted_list() {
        let storage = Arc::new(MemoryStore::new());
        {
            let first = FavoritesStore::new(Arc::clone(&storage));
            first.add_favorite(&entry(1, "bulbasaur"));
            first.add_favorite(&entry(4, "charmander"));
        }

        let second = FavoritesStore::new(Arc::clone(&storage));
        assert!(second.is_empty());
        second.initialize();

        assert_eq!(second.favorites(), vec![entry(1, "bulbasaur"), entry(4, "charmander")]);
    }

    #[test]
    fn test_initialize_ignores_unreadable_blob() {
        let storage = Arc::new(MemoryStore::new());
        storage.set_item(FAVORITES_KEY, "{not json").unwrap();
        let store = FavoritesStore::new(Arc::clone(&storage));

        store.initialize();

        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_adds_persist_final_list_last() {
        let (store, storage) = new_store();

        std::thread::scope(|scope| {
            for id in 1..=8 {
                let store = &store;
                scope.spawn(move || store.add_favorite(&entry(id, "pokemon")));
            }
        });

        assert_eq!(store.len(), 8);
        let writes = storage.writes_for(FAVORITES_KEY);
        assert_eq!(writes.len(), 8);
        let last: Vec<SimplePokemon> = serde_json::from_str(writes.last().unwrap()).unwrap();
        assert_eq!(last, store.favorites());
    }
}
