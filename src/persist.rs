//! Persisted state
//!
//! Every persisted record is a complete snapshot wrapped in a versioned
//! envelope, `{"state": ..., "version": 0}`. Writes are fire-and-forget:
//! a failed write is logged and the in-memory state stays authoritative.

use std::{fmt, marker::PhantomData, sync::Arc};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::{KeyValueStorage, StorageError};

/// Envelope version written by this crate.
pub const STATE_VERSION: u32 = 0;

/// Errors raised while loading or saving a persisted record.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value is not a well-formed record
    #[error("malformed persisted state: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope was written by an incompatible version
    #[error("unsupported persisted state version {0}, expected {STATE_VERSION}")]
    UnsupportedVersion(u32),
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

/// Binds a state type to a fixed storage key.
pub struct Persistence<T> {
    key: &'static str,
    storage: Arc<dyn KeyValueStorage>,
    _state: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Persistence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T> Persistence<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a persistence binding for `key`.
    pub fn new(key: &'static str, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            key,
            storage,
            _state: PhantomData,
        }
    }

    /// Reads and decodes the stored record.
    ///
    /// # Errors
    ///
    /// - [`PersistError::Storage`]: the backend could not be read.
    /// - [`PersistError::Json`]: the value is not a well-formed record.
    /// - [`PersistError::UnsupportedVersion`]: the envelope version is unknown.
    pub fn try_load(&self) -> Result<Option<T>, PersistError> {
        let Some(raw) = self.storage.get(self.key)? else {
            return Ok(None);
        };

        let envelope: Envelope<T> = serde_json::from_str(&raw)?;

        if envelope.version != STATE_VERSION {
            return Err(PersistError::UnsupportedVersion(envelope.version));
        }

        Ok(Some(envelope.state))
    }

    /// Reads the stored record, treating absent or malformed values as `None`.
    pub fn load(&self) -> Option<T> {
        match self.try_load() {
            Ok(Some(state)) => {
                debug!(key = self.key, "restored persisted state");

                Some(state)
            }
            Ok(None) => None,
            Err(error) => {
                warn!(key = self.key, %error, "discarding persisted state");

                None
            }
        }
    }

    /// Encodes and writes the complete record.
    ///
    /// # Errors
    ///
    /// - [`PersistError::Json`]: the state could not be encoded.
    /// - [`PersistError::Storage`]: the backend rejected the write.
    pub fn try_save(&self, state: &T) -> Result<(), PersistError> {
        let raw = serde_json::to_string(&EnvelopeRef {
            state,
            version: STATE_VERSION,
        })?;

        self.storage.set(self.key, &raw)?;

        Ok(())
    }

    /// Writes the complete record, logging rather than returning failures.
    pub fn save(&self, state: &T) {
        if let Err(error) = self.try_save(state) {
            warn!(key = self.key, %error, "failed to persist state");
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::storage::{MemoryStorage, MockKeyValueStorage};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    fn memory() -> Arc<MemoryStorage> {
        Arc::new(MemoryStorage::new())
    }

    #[test]
    fn save_writes_versioned_envelope() -> TestResult {
        let storage = memory();
        let persistence = Persistence::<Counter>::new("counter", storage.clone());

        persistence.try_save(&Counter { count: 3 })?;

        assert_eq!(
            storage.get("counter")?.as_deref(),
            Some(r#"{"state":{"count":3},"version":0}"#)
        );

        Ok(())
    }

    #[test]
    fn load_round_trips() -> TestResult {
        let persistence = Persistence::<Counter>::new("counter", memory());

        persistence.try_save(&Counter { count: 7 })?;

        assert_eq!(persistence.load(), Some(Counter { count: 7 }));

        Ok(())
    }

    #[test]
    fn load_absent_returns_none() {
        let persistence = Persistence::<Counter>::new("counter", memory());

        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn load_malformed_returns_none() -> TestResult {
        let storage = memory();
        storage.set("counter", "{not json")?;

        let persistence = Persistence::<Counter>::new("counter", storage);

        assert!(matches!(persistence.try_load(), Err(PersistError::Json(_))));
        assert_eq!(persistence.load(), None);

        Ok(())
    }

    #[test]
    fn load_unknown_version_returns_none() -> TestResult {
        let storage = memory();
        storage.set("counter", r#"{"state":{"count":1},"version":4}"#)?;

        let persistence = Persistence::<Counter>::new("counter", storage);

        assert!(matches!(
            persistence.try_load(),
            Err(PersistError::UnsupportedVersion(4))
        ));
        assert_eq!(persistence.load(), None);

        Ok(())
    }

    #[test]
    fn load_storage_failure_returns_none() {
        let mut storage = MockKeyValueStorage::new();

        storage
            .expect_get()
            .with(eq("counter"))
            .once()
            .returning(|_| Err(StorageError::Unavailable("offline".to_string())));

        let persistence = Persistence::<Counter>::new("counter", Arc::new(storage));

        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn save_failure_is_swallowed() {
        let mut storage = MockKeyValueStorage::new();

        storage
            .expect_set()
            .once()
            .returning(|_, value| Err(StorageError::QuotaExceeded(value.len(), 0)));

        let persistence = Persistence::<Counter>::new("counter", Arc::new(storage));

        persistence.save(&Counter { count: 1 });
    }

    #[test]
    fn debug_shows_key() {
        let persistence = Persistence::<Counter>::new("counter", memory());

        assert!(format!("{persistence:?}").contains("counter"));
    }
}
