//! HTML rendering for wiki pages.
//!
//! Handlers never talk to the template engine directly. They get a
//! [`Render`] implementation at startup and ask it for one of two
//! [`Template`]s filled with a [`Page`].
//!
//! [`TemplateRenderer`] is the `minijinja` implementation. It either uses the
//! templates built into this crate or loads `view.html` and `edit.html` from a
//! directory.
//!
//! # Template Context
//!
//! | variable | value                                    |
//! |----------|------------------------------------------|
//! | `title`  | page title                               |
//! | `body`   | page body as text (invalid UTF-8 replaced) |
//!
//! Output is HTML-escaped automatically.

mod renderer;

use std::path::PathBuf;

use wiki_page::Page;

pub use renderer::TemplateRenderer;

/// Page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Read-only page view.
    View,
    /// Edit form.
    Edit,
}

impl Template {
    /// All templates a renderer must provide.
    pub const ALL: [Self; 2] = [Self::View, Self::Edit];

    /// Template name as registered with the engine.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::View => "view.html",
            Self::Edit => "edit.html",
        }
    }
}

/// Rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template failed to compile or to render.
    #[error("{0}")]
    Template(#[from] minijinja::Error),

    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        /// Template file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Turns a page into a complete HTML document.
///
/// Implementations are immutable after construction and shared across
/// request handlers.
pub trait Render: Send + Sync {
    /// Render `page` with `template`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the template fails to render.
    fn render(&self, template: Template, page: &Page) -> Result<String, RenderError>;
}
