//! Resolving the page paths of a selected comic.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fs::{absolute_path, list_image_files};
use crate::types::{ComicItem, PageOrder};

/// Absolute page paths of `item`, in `order`.
///
/// A missing folder or one without pages resolves to an empty list rather than an error.
pub fn load_image_paths(item: &ComicItem, order: PageOrder) -> Vec<PathBuf> {
    load_folder(&item.folder_path, order)
}

/// Same as [`load_image_paths`] for callers holding only the comic name.
pub fn load_image_paths_by_name(storage_root: &Path, name: &str, order: PageOrder) -> Vec<PathBuf> {
    load_folder(&absolute_path(storage_root).join(name), order)
}

fn load_folder(folder: &Path, order: PageOrder) -> Vec<PathBuf> {
    if !folder.is_dir() {
        debug!(folder = %folder.display(), "comic folder is missing");
        return Vec::new();
    }
    match list_image_files(folder, order) {
        Ok(paths) => paths,
        Err(err) => {
            debug!(folder = %folder.display(), error = %format!("{err:#}"), "failed to list pages");
            Vec::new()
        }
    }
}
