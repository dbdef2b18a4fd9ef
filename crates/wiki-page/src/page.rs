//! In-memory page value.

use std::borrow::Cow;

use crate::title::Title;

/// A page as read from or about to be written to the store.
///
/// The store owns the durable copy; a `Page` is a transient snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page title.
    pub title: Title,
    /// Raw stored content.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page with the given body.
    #[must_use]
    pub fn new(title: Title, body: Vec<u8>) -> Self {
        Self { title, body }
    }

    /// Create a page with no content yet.
    #[must_use]
    pub fn empty(title: Title) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
