//! Record storage for the wiki server.
//!
//! This crate provides a [`Storage`] trait that maps record keys to raw bytes,
//! hiding the backend from the page layer. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (a directory on disk today, anything key/value later)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read()` and `write()` methods
//! - [`FsStorage`] storing one file per record under a root directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("data"));
//! storage.write("FrontPage.txt", b"Hello")?;
//! assert_eq!(storage.read("FrontPage.txt")?, b"Hello");
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
