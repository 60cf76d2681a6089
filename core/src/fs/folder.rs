//! Directory-based comic sources: page enumeration and copying into storage.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::warn;

use crate::types::PageOrder;

use super::{Result, util};

/// Result of copying a picked folder into the storage root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: Vec<PathBuf>,
    pub failed: usize,
}

/// Enumerate page images within `root`, in `order`.
pub fn list_folder_pages(root: &Path, order: PageOrder) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(anyhow!("folder {:?} does not exist", root));
    }
    if !root.is_dir() {
        return Err(anyhow!("folder {:?} is not a directory", root));
    }
    util::list_image_files(root, order)
}

/// Number of page images directly inside `root`.
pub fn count_folder_pages(root: &Path) -> Result<usize> {
    list_folder_pages(root, PageOrder::Lexical).map(|pages| pages.len())
}

/// Copy every page image of `source` into the existing folder `target`.
///
/// A file that fails to copy is logged and skipped; the remaining pages are still copied.
pub fn copy_folder_pages(source: &Path, target: &Path, order: PageOrder) -> Result<CopyReport> {
    let mut report = CopyReport::default();
    for page in list_folder_pages(source, order)? {
        let Some(name) = page.file_name() else {
            continue;
        };
        let dest = target.join(name);
        match fs::copy(&page, &dest) {
            Ok(_) => report.copied.push(dest),
            Err(err) => {
                warn!(file = %page.display(), error = %err, "failed to copy page");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}
