//! Shared data structures exchanged between the core and the presentation shell.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Stable identifier for an imported comic, derived from its storage folder name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ComicId(String);

impl ComicId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lightweight record emitted for each comic folder found in the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicItem {
    pub id: ComicId,
    pub name: String,
    pub thumbnail_path: Option<PathBuf>,
    pub image_count: usize,
    pub folder_path: PathBuf,
}

impl ComicItem {
    /// Build an item for `folder`, using the first of `pages` as the thumbnail.
    pub fn from_folder(folder: &Path, pages: &[PathBuf]) -> Self {
        let name = folder
            .file_name()
            .map(|os| os.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            id: ComicId::new(name.clone()),
            name,
            thumbnail_path: pages.first().cloned(),
            image_count: pages.len(),
            folder_path: folder.to_path_buf(),
        }
    }
}

/// Archive families recognised by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArchiveKind {
    Zip,
    Rar,
}

impl ArchiveKind {
    /// Extension used for the private cache copy of an archive of this kind.
    pub fn cache_suffix(self) -> &'static str {
        match self {
            ArchiveKind::Zip => ".zip",
            ArchiveKind::Rar => ".rar",
        }
    }
}

/// Ordering applied to page file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageOrder {
    /// Plain byte-wise comparison of names (`10.jpg` sorts before `2.jpg`).
    #[default]
    Lexical,
    /// Digit runs compare numerically (`2.jpg` sorts before `10.jpg`).
    Natural,
}
