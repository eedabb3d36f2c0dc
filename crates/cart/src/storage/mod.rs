//! Key-value storage backends for the cart's persistence side channel.
//!
//! The cart only ever needs a browser-local-storage shaped interface:
//! synchronous `get`/`set` of string blobs under string keys, scoped to one
//! profile, size-limited, with no transactions.
//!
//! - [`MemoryStorage`] - shared in-process map, optionally quota-limited
//! - [`FileStorage`] - one file per key under a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The write would exceed the backend's size limit.
    #[error("storage quota exceeded for {key}: {attempted} bytes > {limit} byte limit")]
    QuotaExceeded {
        key: String,
        limit: usize,
        attempted: usize,
    },

    /// Underlying filesystem failure.
    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A previous holder of the storage lock panicked.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value store.
///
/// Implementations take `&self` so that several cart instances (several
/// "tabs") can share one backend. Last write wins.
pub trait KeyValueStorage {
    /// Read the value under `key`. `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` on quota or I/O failure.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Succeeds if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
