use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::models::SimplePokemon;
use crate::storage::{load_json, save_json, KeyValueStore};

/// Pages older than one hour are treated as absent.
pub const CACHE_EXPIRATION_MS: i64 = 1000 * 60 * 60;

/// Storage key for one `(offset, limit)` page. Distinct pairs never share an entry.
pub fn page_key(offset: u32, limit: u32) -> String {
    format!("pokemons_{}_{}", offset, limit)
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A persisted listing page with its write time in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPage {
    pub data: Vec<SimplePokemon>,
    pub timestamp: i64,
}

impl CachedPage {
    pub fn new(data: Vec<SimplePokemon>) -> Self {
        Self {
            data,
            timestamp: now_millis(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (now_millis() - self.timestamp) / (1000 * 60)
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }

    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp < CACHE_EXPIRATION_MS
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(now_millis())
    }
}

/// Persisted page cache over a key-value backend.
pub struct PageCache<S> {
    storage: Arc<S>,
}

impl<S> Clone for PageCache<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: KeyValueStore> PageCache<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Raw entry regardless of age.
    pub fn entry(&self, offset: u32, limit: u32) -> Result<Option<CachedPage>, StorageError> {
        load_json(self.storage.as_ref(), &page_key(offset, limit))
    }

    /// Data of a still-valid entry. Absent, expired and unreadable entries
    /// are all a miss.
    pub fn load(&self, offset: u32, limit: u32) -> Option<Vec<SimplePokemon>> {
        match self.entry(offset, limit) {
            Ok(Some(page)) if page.is_valid() => {
                debug!(offset, limit, age = %page.age_display(), "Page cache hit");
                Some(page.data)
            }
            Ok(Some(_)) => {
                debug!(offset, limit, "Page cache entry expired");
                None
            }
            Ok(None) => {
                debug!(offset, limit, "Page cache miss");
                None
            }
            Err(e) => {
                warn!(offset, limit, error = %e, "Failed to read page cache, treating as miss");
                None
            }
        }
    }

    /// Write `data` under the page's key, stamped with the current time.
    pub fn save(&self, offset: u32, limit: u32, data: &[SimplePokemon]) -> Result<(), StorageError> {
        let page = CachedPage::new(data.to_vec());
        save_json(self.storage.as_ref(), &page_key(offset, limit), &page)
    }
}

// ============================================================================
// Tests
// ============================================================================
