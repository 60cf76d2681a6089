//! File system access layer: folders, archives, and storage naming.

pub mod archive;
pub mod folder;
pub mod format;
pub mod namer;
mod util;

pub use archive::{ExtractReport, extract_archive};
pub use folder::{CopyReport, copy_folder_pages, count_folder_pages, list_folder_pages};
pub use format::{archive_stem, detect_archive_kind};
pub use namer::{create_unique_folder, unique_folder_name};
pub use util::{
    IMAGE_EXTENSIONS, Token, absolute_path, compare_names, entry_base_name, is_image_name,
    is_supported_image, list_image_files, natural_cmp, tokenize,
};

/// Shared result type for fs operations.
pub type Result<T> = crate::Result<T>;
