//! Key-value storage port
//!
//! Whatever durable key-value store the host provides. Each write replaces
//! the whole value stored under a key; there are no partial or delta writes.

use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend cannot currently be used
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the backend's capacity (bytes requested, bytes allowed)
    #[error("storage quota exceeded: {0} bytes requested, {1} allowed")]
    QuotaExceeded(usize, usize),

    /// Key cannot be represented by this backend
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Durable string storage keyed by a fixed store name.
#[automock]
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
