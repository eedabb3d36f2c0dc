//! Cart error types.
//!
//! None of these reach the cart's callers: the store logs and absorbs them.
//! They exist so the internal persistence path can use `?` and so the
//! log lines say exactly what went wrong.

use thiserror::Error;

use crate::storage::StorageError;

/// Failures on the persistence side channel.
#[derive(Debug, Error)]
pub enum CartError {
    /// Persisted blob is not a JSON array of records.
    #[error("stored cart is corrupt: {0}")]
    Corrupt(String),

    /// Line items could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading the blob from storage failed.
    #[error("failed to read stored cart: {0}")]
    StorageRead(#[source] StorageError),

    /// Writing the blob to storage failed.
    #[error("failed to write cart to storage: {0}")]
    StorageWrite(#[source] StorageError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
