//! In-memory storage backed by a shared `HashMap`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStorage, StorageError};

/// In-memory key-value storage.
///
/// Clones share the same map, which is how tests model a page reload or a
/// second tab reading the same profile storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    /// Create a new empty, unlimited storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size (keys plus values, in bytes) the storage accepts.
    #[must_use]
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;

        if let Some(limit) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let attempted = others + key.len() + value.len();
            if attempted > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    limit,
                    attempted,
                });
            }
        }

        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let storage = MemoryStorage::new();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let tab_a = MemoryStorage::new();
        let tab_b = tab_a.clone();
        tab_a.set("k", "v").unwrap();
        assert_eq!(tab_b.get("k").unwrap().as_deref(), Some("v"));
        tab_b.remove("k").unwrap();
        assert!(tab_a.is_empty());
    }

    #[test]
    fn test_quota_rejects_oversized_write_and_keeps_previous_value() {
        let storage = MemoryStorage::new().with_quota(8);
        storage.set("k", "small").unwrap();

        let err = storage.set("k", "much too large").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                limit: 8,
                attempted: 15,
                ..
            }
        ));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::new().with_quota(6);
        storage.set("k", "12345").unwrap();
        // Replacing the value frees the old bytes first.
        storage.set("k", "54321").unwrap();
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("absent").is_ok());
    }
}
