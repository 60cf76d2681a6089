//! Comic library: storage scanning, the in-memory list, and the import pipeline.

pub mod import;
mod list;
pub mod loader;
mod scan;
mod service;
mod state;

pub use import::{ImportOutcome, ensure_storage_root, import_archive, import_folder, refresh};
pub use list::ComicList;
pub use loader::{load_image_paths, load_image_paths_by_name};
pub use scan::scan_storage;
pub use service::Library;
pub use state::{ImportPhase, ShelfState};
