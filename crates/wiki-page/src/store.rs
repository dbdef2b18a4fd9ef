//! Page persistence on top of a [`Storage`] backend.

use std::sync::Arc;

use wiki_storage::{Storage, StorageError};

use crate::page::Page;
use crate::title::Title;

/// Extension of the record holding a page body.
const RECORD_EXTENSION: &str = "txt";

/// Error returned by [`PageStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// No record exists for the title yet.
    #[error("Page not found: {0}")]
    NotFound(Title),

    /// The backend failed for a reason other than absence.
    #[error(transparent)]
    Storage(StorageError),
}

/// Loads and saves pages, one record per title.
///
/// Cloning is cheap; clones share the same backend.
#[derive(Clone)]
pub struct PageStore {
    storage: Arc<dyn Storage>,
}

impl PageStore {
    /// Create a page store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Record key for a title (`<title>.txt`).
    #[must_use]
    pub fn record_key(title: &Title) -> String {
        format!("{title}.{RECORD_EXTENSION}")
    }

    /// Load the page stored under `title`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotFound`] if the title was never saved, or
    /// [`PageError::Storage`] if the record exists but can't be read.
    pub fn load(&self, title: &Title) -> Result<Page, PageError> {
        match self.storage.read(&Self::record_key(title)) {
            Ok(body) => {
                tracing::debug!(title = %title, bytes = body.len(), "Page loaded");
                Ok(Page::new(title.clone(), body))
            }
            Err(e) if e.is_not_found() => Err(PageError::NotFound(title.clone())),
            Err(e) => Err(PageError::Storage(e)),
        }
    }

    /// Replace the stored body of `page.title` with `page.body`.
    ///
    /// Either the whole new body is stored or the previous content remains.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Storage`] if the record can't be written.
    pub fn save(&self, page: &Page) -> Result<(), PageError> {
        self.storage
            .write(&Self::record_key(&page.title), &page.body)
            .map_err(PageError::Storage)?;
        tracing::info!(title = %page.title, bytes = page.body.len(), "Page saved");
        Ok(())
    }
}

impl std::fmt::Debug for PageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStore").finish_non_exhaustive()
    }
}
