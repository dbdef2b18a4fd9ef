//! Request path parsing.
//!
//! Every request path resolves to exactly one [`Route`]. The only page paths
//! are `/view/<title>`, `/edit/<title>` and `/save/<title>`; the bare root
//! `/` is a fixed entry point, and anything else is [`Route::NotFound`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::title::{InvalidTitle, TITLE_CLASS, Title};

static PAGE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^/(view|edit|save)/({TITLE_CLASS})$")).expect("route pattern is valid")
});

/// Operation a page path asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Show a page.
    View,
    /// Show the edit form for a page.
    Edit,
    /// Store a submitted body for a page.
    Save,
}

impl Operation {
    /// Path segment naming this operation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Save => "save",
        }
    }

    /// Request path performing this operation on `title`.
    #[must_use]
    pub fn path(self, title: &Title) -> String {
        format!("/{}/{title}", self.as_str())
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "view" => Some(Self::View),
            "edit" => Some(Self::Edit),
            "save" => Some(Self::Save),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The bare root path `/`.
    Root,
    /// A page operation on a validated title.
    Page {
        /// Requested operation.
        op: Operation,
        /// Validated page title.
        title: Title,
    },
    /// Any other path.
    NotFound,
}

impl Route {
    /// Resolve a raw (still percent-encoded) request path.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        if path == "/" {
            return Self::Root;
        }
        match validate_path(path) {
            Ok((op, title)) => Self::Page { op, title },
            Err(_) => Self::NotFound,
        }
    }
}

/// Extract the operation and title from a `/<op>/<title>` path.
///
/// The whole path must match; there is no partial extraction.
///
/// # Errors
///
/// Returns [`InvalidTitle`] carrying the full path when the operation is
/// unknown, the title is missing or illegal, or extra segments are present.
pub fn validate_path(path: &str) -> Result<(Operation, Title), InvalidTitle> {
    let invalid = || InvalidTitle(path.to_owned());
    let caps = PAGE_PATH_RE.captures(path).ok_or_else(invalid)?;

    let op = caps
        .get(1)
        .and_then(|m| Operation::from_segment(m.as_str()))
        .ok_or_else(invalid)?;
    let title = caps
        .get(2)
        .ok_or_else(invalid)
        .and_then(|m| Title::parse(m.as_str()).map_err(|_| invalid()))?;

    Ok((op, title))
}
