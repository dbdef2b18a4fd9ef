//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use wiki_page::{PageStore, Title};
use wiki_render::Render;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page store over the configured storage backend.
    pub(crate) pages: PageStore,
    /// Renderer for the view and edit templates.
    pub(crate) renderer: Arc<dyn Render>,
    /// Title `/` redirects to.
    pub(crate) root_title: Title,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pages", &self.pages)
            .field("root_title", &self.root_title)
            .finish_non_exhaustive()
    }
}
