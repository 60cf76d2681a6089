//! Blocking import pipeline: copy or extract into the storage root, then rescan.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tracing::{debug, info, warn};

use crate::config::LibraryConfig;
use crate::error::ImportError;
use crate::fs::{
    archive_stem, copy_folder_pages, count_folder_pages, create_unique_folder,
    detect_archive_kind, extract_archive,
};

use super::{ComicList, scan_storage};

const CACHE_FILE_PREFIX: &str = "comic_";

/// What a successful import produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Folder created inside the storage root.
    pub folder: PathBuf,
    /// Pages written into that folder.
    pub pages: usize,
    /// Fresh scan of the storage root, replacing the caller's list.
    pub comics: ComicList,
}

/// Create the storage root if needed and check that it is a directory.
pub fn ensure_storage_root(root: &Path) -> Result<PathBuf, ImportError> {
    if let Err(source) = fs::create_dir_all(root) {
        return Err(ImportError::StorageUnavailable { path: root.to_path_buf(), source });
    }
    if !root.is_dir() {
        return Err(ImportError::StorageUnavailable {
            path: root.to_path_buf(),
            source: io::Error::other("path exists but is not a directory"),
        });
    }
    Ok(root.to_path_buf())
}

/// Rescan the storage root.
pub fn refresh(config: &LibraryConfig) -> ComicList {
    scan_storage(&config.storage_root, config.page_order)
}

/// Import a ZIP/CBZ/RAR/CBR archive as a new comic folder.
pub fn import_archive(config: &LibraryConfig, source: &Path) -> Result<ImportOutcome, ImportError> {
    let display_name = display_name(source)?;
    let kind = detect_archive_kind(&display_name)?;
    let root = ensure_storage_root(&config.storage_root)?;
    let target = create_unique_folder(&root, &archive_stem(&display_name))?;

    let cached = copy_to_cache(&config.cache_dir, source, kind.cache_suffix())?;
    debug!(source = %source.display(), cache = %cached.path().display(), "archive copied to cache");

    let report = extract_archive(kind, cached.path(), &target, config.page_order)?;
    if let Err(err) = cached.close() {
        warn!(error = %err, "failed to remove cached archive copy");
    }

    let comics = scan_storage(&root, config.page_order);
    info!(
        archive = %display_name,
        folder = %target.display(),
        pages = report.written.len(),
        "imported archive"
    );
    Ok(ImportOutcome { folder: target, pages: report.written.len(), comics })
}

/// Import a folder of page images, refusing one already present in `current`.
///
/// A folder counts as already present when an item has the same name and page count.
pub fn import_folder(
    config: &LibraryConfig,
    current: &ComicList,
    source: &Path,
) -> Result<ImportOutcome, ImportError> {
    let name = display_name(source)?;
    let image_count = count_folder_pages(source)?;
    if current.contains_duplicate(&name, image_count) {
        warn!(name = %name, image_count, "comic folder already imported; skipping");
        return Err(ImportError::Duplicate { name, image_count });
    }

    let root = ensure_storage_root(&config.storage_root)?;
    let target = create_unique_folder(&root, &name)?;
    let report = copy_folder_pages(source, &target, config.page_order)?;
    if report.failed > 0 {
        warn!(folder = %target.display(), failed = report.failed, "some pages were not copied");
    }

    let comics = scan_storage(&root, config.page_order);
    info!(name = %name, folder = %target.display(), pages = report.copied.len(), "imported folder");
    Ok(ImportOutcome { folder: target, pages: report.copied.len(), comics })
}

/// Name of the picked folder or archive; `.` and `..` resolve to the directory they denote.
fn display_name(source: &Path) -> crate::Result<String> {
    if let Some(name) = source.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }
    let resolved =
        fs::canonicalize(source).with_context(|| format!("resolving {}", source.display()))?;
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{:?} has no file name", source))
}

fn copy_to_cache(
    cache_dir: &Path,
    source: &Path,
    suffix: &str,
) -> crate::Result<tempfile::NamedTempFile> {
    fs::create_dir_all(cache_dir)
        .with_context(|| format!("creating cache directory {}", cache_dir.display()))?;
    let mut cached = tempfile::Builder::new()
        .prefix(CACHE_FILE_PREFIX)
        .suffix(suffix)
        .tempfile_in(cache_dir)
        .with_context(|| format!("allocating cache file in {}", cache_dir.display()))?;

    let mut input =
        File::open(source).with_context(|| format!("opening archive {}", source.display()))?;
    io::copy(&mut input, cached.as_file_mut())
        .with_context(|| format!("copying {} to cache", source.display()))?;
    cached.flush().context("flushing cache file")?;
    Ok(cached)
}
