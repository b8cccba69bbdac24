//! Durable key-value persistence.
//!
//! The stores only need `get` and `set` on string values, so persistence is
//! a small capability trait. `FileStore` keeps one JSON file per key on disk;
//! `MemoryStore` keeps everything in process and records every write.

mod file;
mod memory;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Trait for durable key-value backends. Values are JSON text.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}
