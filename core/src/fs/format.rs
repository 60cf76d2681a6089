//! Archive family detection by display-name suffix.

use crate::error::ImportError;
use crate::types::ArchiveKind;

/// Suffix table, checked in order; the first match wins.
const ARCHIVE_SUFFIXES: &[(&str, ArchiveKind)] = &[
    (".zip", ArchiveKind::Zip),
    (".cbz", ArchiveKind::Zip),
    (".rar", ArchiveKind::Rar),
    (".cbr", ArchiveKind::Rar),
];

const UNKNOWN_ARCHIVE_NAME: &str = "Unknown archive";

/// Map a display name to its archive family. Content is never sniffed.
pub fn detect_archive_kind(display_name: &str) -> Result<ArchiveKind, ImportError> {
    matching_suffix(display_name)
        .map(|(_, kind)| kind)
        .ok_or_else(|| ImportError::UnsupportedFormat { name: display_name.to_string() })
}

/// Folder name for an imported archive: the display name minus its archive suffix.
pub fn archive_stem(display_name: &str) -> String {
    let stem = match matching_suffix(display_name) {
        Some((suffix, _)) => &display_name[..display_name.len() - suffix.len()],
        None => display_name,
    };
    let stem = stem.trim();
    if stem.is_empty() { UNKNOWN_ARCHIVE_NAME.to_string() } else { stem.to_string() }
}

fn matching_suffix(display_name: &str) -> Option<(&'static str, ArchiveKind)> {
    ARCHIVE_SUFFIXES.iter().copied().find(|(suffix, _)| {
        display_name
            .len()
            .checked_sub(suffix.len())
            .and_then(|start| display_name.get(start..))
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
    })
}
