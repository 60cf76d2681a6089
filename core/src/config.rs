//! Library locations and page ordering.

use std::path::{Path, PathBuf};

use crate::fs::absolute_path;
use crate::types::PageOrder;

pub const STORAGE_ROOT_ENV: &str = "COMIC_SHELF_STORAGE";
pub const CACHE_DIR_ENV: &str = "COMIC_SHELF_CACHE";

/// Name of the shared folder holding every imported comic.
pub const STORAGE_DIR_NAME: &str = "ComicStorage";

const APP_QUALIFIER: &str = "com";
const APP_ORGANISATION: &str = "ComicShelf";
const APP_NAME: &str = "comic-shelf";

/// Where comics are stored and how their pages are ordered.
///
/// Locations given through the environment or the builders are made absolute, so every path
/// derived from them is absolute too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Shared directory with one subdirectory per comic.
    pub storage_root: PathBuf,
    /// Private directory for transient archive copies.
    pub cache_dir: PathBuf,
    pub page_order: PageOrder,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        let storage_root = env_path(STORAGE_ROOT_ENV).unwrap_or_else(default_storage_root);
        let cache_dir = env_path(CACHE_DIR_ENV).unwrap_or_else(default_cache_dir);
        Self { storage_root, cache_dir, page_order: PageOrder::default() }
    }
}

impl LibraryConfig {
    pub fn with_storage_root<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.storage_root = absolute_path(&path.into());
        self
    }

    pub fn with_cache_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cache_dir = absolute_path(&path.into());
        self
    }

    pub fn with_page_order(mut self, order: PageOrder) -> Self {
        self.page_order = order;
        self
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(|value| absolute_path(Path::new(&value)))
}

fn default_storage_root() -> PathBuf {
    match directories::UserDirs::new() {
        Some(dirs) => dirs.home_dir().join(STORAGE_DIR_NAME),
        None => std::env::temp_dir().join(STORAGE_DIR_NAME),
    }
}

fn default_cache_dir() -> PathBuf {
    match directories::ProjectDirs::from(APP_QUALIFIER, APP_ORGANISATION, APP_NAME) {
        Some(dirs) => dirs.cache_dir().to_path_buf(),
        None => std::env::temp_dir().join("comic-shelf-cache"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_override_defaults() {
        let config = LibraryConfig::default()
            .with_storage_root("/data/comics")
            .with_cache_dir("/data/cache")
            .with_page_order(PageOrder::Natural);

        assert_eq!(config.storage_root, PathBuf::from("/data/comics"));
        assert_eq!(config.cache_dir, PathBuf::from("/data/cache"));
        assert_eq!(config.page_order, PageOrder::Natural);
    }

    #[test]
    fn relative_locations_become_absolute() {
        let config = LibraryConfig::default().with_storage_root("comics").with_cache_dir("cache");

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.storage_root, cwd.join("comics"));
        assert_eq!(config.cache_dir, cwd.join("cache"));
    }

    #[test]
    fn default_root_uses_storage_folder_name() {
        if std::env::var_os(STORAGE_ROOT_ENV).is_some() {
            return;
        }
        let config = LibraryConfig::default();
        assert!(config.storage_root.ends_with(STORAGE_DIR_NAME));
    }
}
