//! Error types shared across the core that are not tied to HTTP transport.
//!
//! Transport failures live in [`crate::api::ApiError`]. The two kinds here
//! are kept apart because they are handled differently: persistence failures
//! are logged and absorbed by the stores, while integrity failures propagate
//! to the caller.

use thiserror::Error;

/// The catalog returned data that does not have the shape we rely on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Malformed resource URL: {0}")]
    MalformedResourceUrl(String),
}

/// Failure reading or writing the durable key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
