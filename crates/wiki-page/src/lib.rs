//! Pages for the wiki server.
//!
//! A page is a [`Title`] plus a raw byte body. This crate owns everything
//! that decides which titles exist and where they live:
//!
//! - [`Title`]: an ASCII alphanumeric identifier, only constructible through validation
//! - [`Route`]: the parsed shape of a request path (`/`, `/<op>/<title>`, or not found)
//! - [`PageStore`]: load and save pages against a [`wiki_storage::Storage`] backend
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wiki_page::{Page, PageStore, Route};
//! use wiki_storage::FsStorage;
//!
//! let store = PageStore::new(Arc::new(FsStorage::new("data".into())));
//! if let Route::Page { title, .. } = Route::parse("/view/FrontPage") {
//!     store.save(&Page::new(title.clone(), b"Hello".to_vec()))?;
//!     assert_eq!(store.load(&title)?.body, b"Hello");
//! }
//! ```

mod page;
mod route;
mod store;
mod title;

pub use page::Page;
pub use route::{Operation, Route, validate_path};
pub use store::{PageError, PageStore};
pub use title::{InvalidTitle, Title};
