//! Re-deriving the comic list from the storage root.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, error, warn};

use crate::fs::{absolute_path, list_image_files};
use crate::types::{ComicItem, PageOrder};

use super::ComicList;

/// Build one [`ComicItem`] per immediate subdirectory of `root` holding at least one page.
///
/// Items follow the directory listing order and carry absolute paths. Scanning never fails: a
/// missing or unreadable storage root yields an empty list, and unreadable entries are skipped.
pub fn scan_storage(root: &Path, order: PageOrder) -> ComicList {
    let root = absolute_path(root);
    let listing = match fs::read_dir(&root) {
        Ok(listing) => listing,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(root = %root.display(), "storage root does not exist yet");
            return ComicList::default();
        }
        Err(err) => {
            error!(root = %root.display(), error = %err, "failed to read storage root");
            return ComicList::default();
        }
    };

    let mut items = Vec::new();
    for entry in listing {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = %root.display(), error = %err, "skipping unreadable storage entry");
                continue;
            }
        };
        let folder = entry.path();
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => {}
            Ok(_) => continue,
            Err(err) => {
                warn!(entry = %folder.display(), error = %err, "skipping unreadable storage entry");
                continue;
            }
        }

        let pages = match list_image_files(&folder, order) {
            Ok(pages) => pages,
            Err(err) => {
                warn!(
                    folder = %folder.display(),
                    error = %format!("{err:#}"),
                    "skipping unreadable comic folder"
                );
                continue;
            }
        };
        if pages.is_empty() {
            debug!(folder = %folder.display(), "skipping folder without pages");
            continue;
        }

        items.push(ComicItem::from_folder(&folder, &pages));
    }

    debug!(root = %root.display(), comics = items.len(), "scanned storage root");
    ComicList::new(items)
}
