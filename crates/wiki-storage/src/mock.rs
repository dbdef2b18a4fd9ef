//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores records in memory. Use the builder methods to seed records or to
/// make reads and writes fail with a chosen error kind.
///
/// # Example
///
/// ```ignore
/// use wiki_storage::{MockStorage, Storage, StorageErrorKind};
///
/// let storage = MockStorage::new()
///     .with_record("FrontPage.txt", "Hello")
///     .with_write_error(StorageErrorKind::StorageFull);
///
/// assert_eq!(storage.read("FrontPage.txt").unwrap(), b"Hello");
/// assert!(storage.write("FrontPage.txt", b"Bye").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    records: RwLock<HashMap<String, Vec<u8>>>,
    read_error: RwLock<Option<StorageErrorKind>>,
    write_error: RwLock<Option<StorageErrorKind>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record with the given key and content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_record(self, key: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.records
            .write()
            .unwrap()
            .insert(key.into(), content.into());
        self
    }

    /// Make every read fail with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_read_error(self, kind: StorageErrorKind) -> Self {
        *self.read_error.write().unwrap() = Some(kind);
        self
    }

    /// Make every write fail with `kind`. Stored records are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_write_error(self, kind: StorageErrorKind) -> Self {
        *self.write_error.write().unwrap() = Some(kind);
        self
    }

    /// Snapshot of a record's content, bypassing injected read errors.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn record(&self, key: &str) -> Option<Vec<u8>> {
        self.records.read().unwrap().get(key).cloned()
    }

    /// Number of stored records.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Check whether no records are stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn injected(kind: StorageErrorKind, key: &str) -> StorageError {
        StorageError::new(kind).with_path(key).with_backend(BACKEND)
    }
}

impl Storage for MockStorage {
    fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        if let Some(kind) = *self.read_error.read().unwrap() {
            return Err(Self::injected(kind, key));
        }
        self.records
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key).with_backend(BACKEND))
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        if let Some(kind) = *self.write_error.read().unwrap() {
            return Err(Self::injected(kind, key));
        }
        self.records
            .write()
            .unwrap()
            .insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
