use std::path::PathBuf;

use tracing::debug;

use super::KeyValueStore;
use crate::error::StorageError;

/// One `<key>.json` file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(contents))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key);
        std::fs::write(&path, value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        debug!(key, bytes = value.len(), "Wrote stored item");
        Ok(())
    }
}
