//! Core library for the comic shelf: importing comics into a storage root and reading them back.

#![deny(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod fs;
pub mod library;
pub mod log;
pub mod types;
pub mod viewer;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub use config::LibraryConfig;
pub use error::ImportError;
pub use library::{ComicList, ImportOutcome, ImportPhase, Library, ShelfState};
pub use types::{ArchiveKind, ComicId, ComicItem, PageOrder};
pub use viewer::{ViewerSession, ViewerState};

/// Returns the version of the core crate for diagnostics.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
