//! In-memory storage

use std::sync::RwLock;

use rustc_hash::FxHashMap;

use super::{KeyValueStorage, StorageError};

/// Process-local storage, optionally bounded like a browser storage quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<FxHashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Creates empty, unbounded storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty storage that rejects writes once the stored bytes would exceed `quota`.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: RwLock::default(),
            quota: Some(quota),
        }
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("memory storage lock poisoned".to_string())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_poison| Self::poisoned())?;

        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_poison| Self::poisoned())?;

        if let Some(quota) = self.quota {
            let others: usize = values
                .iter()
                .filter(|(stored_key, _)| stored_key.as_str() != key)
                .map(|(stored_key, stored)| stored_key.len() + stored.len())
                .sum();

            let requested = others + key.len() + value.len();

            if requested > quota {
                return Err(StorageError::QuotaExceeded(requested, quota));
            }
        }

        values.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|_poison| Self::poisoned())?;

        values.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn get_missing_key_returns_none() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("absent")?, None);

        Ok(())
    }

    #[test]
    fn set_replaces_whole_value() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set("k", "first")?;
        storage.set("k", "second")?;

        assert_eq!(storage.get("k")?.as_deref(), Some("second"));

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set("k", "v")?;
        storage.remove("k")?;
        storage.remove("k")?;

        assert_eq!(storage.get("k")?, None);

        Ok(())
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() -> TestResult {
        let storage = MemoryStorage::with_quota(8);

        storage.set("k", "12345")?;
        let result = storage.set("k", "123456789");

        assert!(
            matches!(result, Err(StorageError::QuotaExceeded(10, 8))),
            "expected QuotaExceeded, got {result:?}"
        );
        assert_eq!(storage.get("k")?.as_deref(), Some("12345"));

        Ok(())
    }

    #[test]
    fn quota_counts_other_keys() -> TestResult {
        let storage = MemoryStorage::with_quota(6);

        storage.set("a", "12")?;

        let result = storage.set("b", "123");

        assert!(
            matches!(result, Err(StorageError::QuotaExceeded(7, 6))),
            "expected QuotaExceeded, got {result:?}"
        );

        storage.set("b", "12")?;
        assert_eq!(storage.get("b")?.as_deref(), Some("12"));

        Ok(())
    }
}
