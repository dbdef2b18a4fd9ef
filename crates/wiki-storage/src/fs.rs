//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] keeping one file per record under a root directory.
//! Writes go to a temporary file in the same directory which is then renamed
//! over the record, so readers never observe a half-written body.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use wiki_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("data"));
/// let body = storage.read("FrontPage.txt")?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Directory holding one file per record.
    root_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root_dir`.
    ///
    /// The directory does not need to exist yet; it is created on first write.
    #[must_use]
    pub fn new(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }

    /// Validate that a key names a plain file directly under the root.
    ///
    /// Rejects empty keys, keys with separators or parent components, and
    /// dot-prefixed names (temporary files live under those).
    fn validate_key(key: &str) -> Result<(), StorageError> {
        let mut components = Path::new(key).components();
        let is_plain_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if !is_plain_name || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(key)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    fn io_error(err: std::io::Error, path: &Path) -> StorageError {
        StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        Self::validate_key(key)?;
        let full_path = self.root_dir.join(key);
        fs::read(&full_path).map_err(|e| Self::io_error(e, &full_path))
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        Self::validate_key(key)?;
        let full_path = self.root_dir.join(key);

        fs::create_dir_all(&self.root_dir).map_err(|e| Self::io_error(e, &self.root_dir))?;

        // Temp file must share the record's directory for the rename to be atomic
        let mut temp = NamedTempFile::new_in(&self.root_dir)
            .map_err(|e| Self::io_error(e, &self.root_dir))?;
        temp.write_all(data)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| Self::io_error(e, temp.path()))?;
        temp.persist(&full_path)
            .map_err(|e| Self::io_error(e.error, &full_path))?;

        tracing::debug!(path = %full_path.display(), bytes = data.len(), "Record written");
        Ok(())
    }
}
