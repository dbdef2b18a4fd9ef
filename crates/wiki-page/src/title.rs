//! Validated page titles.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Character class a title is made of. Shared with the route pattern.
pub(crate) const TITLE_CLASS: &str = "[a-zA-Z0-9]+";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{TITLE_CLASS}$")).expect("title pattern is valid"));

/// Error for a string that is not a legal page title.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid page title: {0:?}")]
pub struct InvalidTitle(pub String);

/// Page title: one or more ASCII letters or digits.
///
/// A `Title` is also the basis of the on-disk record name, so the charset is
/// what keeps user input from ever reaching the filesystem as a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Title(String);

impl Title {
    /// Validate `value` as a title.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTitle`] if `value` is empty or contains anything but
    /// ASCII letters and digits.
    pub fn parse(value: &str) -> Result<Self, InvalidTitle> {
        if TITLE_RE.is_match(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(InvalidTitle(value.to_owned()))
        }
    }

    /// Title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Title {
    type Err = InvalidTitle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
