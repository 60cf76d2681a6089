//! ZIP/CBZ and RAR/CBR extraction into a flat comic folder.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};
use zip::read::ZipArchive;

use crate::types::{ArchiveKind, PageOrder};

use super::{Result, util};

/// Outcome of a completed extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Files present in the target once extraction finished, in page order.
    pub written: Vec<PathBuf>,
    /// Image entries whose base name was already taken by an earlier entry.
    pub overwritten: usize,
    /// Entries dropped because they were not page images.
    pub skipped: usize,
}

/// An image entry selected for extraction.
#[derive(Debug)]
struct PageEntry<K> {
    key: K,
    full_name: String,
    base_name: String,
}

/// Extract every page image of `archive` into `target`, flattening directories.
///
/// Entries are written in `order` of their full entry name, each under its base name, so when
/// two entries share a base name the later one replaces the earlier. Any read or write failure
/// aborts the extraction and leaves already written files in place.
pub fn extract_archive(
    kind: ArchiveKind,
    archive: &Path,
    target: &Path,
    order: PageOrder,
) -> Result<ExtractReport> {
    debug!(archive = %archive.display(), target = %target.display(), ?kind, "extracting archive");
    let report = match kind {
        ArchiveKind::Zip => extract_zip(archive, target, order)?,
        ArchiveKind::Rar => extract_rar(archive, target, order)?,
    };
    if report.overwritten > 0 {
        warn!(
            archive = %archive.display(),
            overwritten = report.overwritten,
            "archive pages share base names; later entries replaced earlier ones"
        );
    }
    Ok(report)
}

fn extract_zip(path: &Path, target: &Path, order: PageOrder) -> Result<ExtractReport> {
    let file = File::open(path).with_context(|| format!("opening archive {:?}", path))?;
    let mut archive =
        ZipArchive::new(file).with_context(|| format!("reading zip directory of {:?}", path))?;

    let mut pages = Vec::new();
    let mut skipped = 0;
    for idx in 0..archive.len() {
        let entry = archive.by_index(idx).with_context(|| format!("reading zip entry #{idx}"))?;
        if entry.is_dir() {
            continue;
        }
        let full_name = entry.name().to_string();
        match select_page(&full_name) {
            Some(base_name) => pages.push(PageEntry { key: idx, full_name, base_name }),
            None => skipped += 1,
        }
    }

    sort_pages(&mut pages, order);

    for page in &pages {
        let mut entry = archive
            .by_index(page.key)
            .with_context(|| format!("reading zip entry {:?}", page.full_name))?;
        let out_path = target.join(&page.base_name);
        let mut out =
            File::create(&out_path).with_context(|| format!("creating {}", out_path.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("extracting {:?} to {}", page.full_name, out_path.display()))?;
    }

    Ok(summarise(target, &pages, skipped))
}

#[cfg(feature = "rar")]
fn extract_rar(path: &Path, target: &Path, order: PageOrder) -> Result<ExtractReport> {
    let listing = unrar::Archive::new(path)
        .open_for_listing()
        .with_context(|| format!("opening archive {:?}", path))?;

    let mut pages = Vec::new();
    let mut skipped = 0;
    for header in listing {
        let header = header.with_context(|| format!("listing rar entries of {:?}", path))?;
        if header.is_directory() {
            continue;
        }
        let full_name = header.filename.to_string_lossy().into_owned();
        match select_page(&full_name) {
            Some(base_name) => {
                pages.push(PageEntry { key: full_name.clone(), full_name, base_name })
            }
            None => skipped += 1,
        }
    }

    sort_pages(&mut pages, order);

    // The decoder only streams in archive order, so resolve collisions up front and extract the
    // entry that would have been written last for each base name.
    let mut winners: HashMap<&str, &str> = HashMap::new();
    for page in &pages {
        winners.retain(|_, base| *base != page.base_name.as_str());
        winners.insert(page.key.as_str(), page.base_name.as_str());
    }

    let mut archive = unrar::Archive::new(path)
        .open_for_processing()
        .with_context(|| format!("opening archive {:?}", path))?;
    while let Some(header) =
        archive.read_header().with_context(|| format!("reading rar header of {:?}", path))?
    {
        let name = header.entry().filename.to_string_lossy().into_owned();
        archive = match winners.get(name.as_str()) {
            Some(base_name) if header.entry().is_file() => {
                let out_path = target.join(base_name);
                header
                    .extract_to(&out_path)
                    .with_context(|| format!("extracting {:?} to {}", name, out_path.display()))?
            }
            _ => header.skip().with_context(|| format!("skipping rar entry {:?}", name))?,
        };
    }

    Ok(summarise(target, &pages, skipped))
}

#[cfg(not(feature = "rar"))]
fn extract_rar(path: &Path, _target: &Path, _order: PageOrder) -> Result<ExtractReport> {
    Err(anyhow::anyhow!("RAR support is not compiled in; cannot extract {:?}", path))
}

fn select_page(full_name: &str) -> Option<String> {
    util::entry_base_name(full_name).filter(|base| util::is_image_name(base))
}

fn sort_pages<K>(pages: &mut [PageEntry<K>], order: PageOrder) {
    pages.sort_by(|a, b| util::compare_names(order, &a.full_name, &b.full_name));
}

fn summarise<K>(target: &Path, pages: &[PageEntry<K>], skipped: usize) -> ExtractReport {
    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (idx, page) in pages.iter().enumerate() {
        last_index.insert(page.base_name.as_str(), idx);
    }

    let written = pages
        .iter()
        .enumerate()
        .filter(|(idx, page)| last_index.get(page.base_name.as_str()) == Some(idx))
        .map(|(_, page)| target.join(&page.base_name))
        .collect::<Vec<_>>();

    ExtractReport { overwritten: pages.len() - written.len(), written, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::CompressionMethod;
    use zip::write::FileOptions;

    #[test]
    fn extracts_only_images_in_name_order() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("demo.cbz");
        create_zip(
            &archive_path,
            &[("10.jpg", "ten"), ("2.png", "two"), ("001.jpeg", "one"), ("notes.txt", "n")],
        );
        let target = dir.path().join("out");
        fs::create_dir(&target).unwrap();

        let report =
            extract_archive(ArchiveKind::Zip, &archive_path, &target, PageOrder::Lexical).unwrap();

        let names: Vec<String> = report
            .written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["001.jpeg", "10.jpg", "2.png"]);
        assert_eq!(report.skipped, 1);
        assert_eq!(fs::read(target.join("2.png")).unwrap(), b"two");
        assert!(!target.join("notes.txt").exists());
    }

    #[test]
    fn flattens_directories_and_drops_resource_forks() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("demo.zip");
        create_zip(
            &archive_path,
            &[
                ("chapter1/", ""),
                ("chapter1/01.png", "a"),
                ("__MACOSX/chapter1/._01.png", "fork"),
                ("chapter2/02.webp", "b"),
            ],
        );
        let target = dir.path().join("out");
        fs::create_dir(&target).unwrap();

        let report =
            extract_archive(ArchiveKind::Zip, &archive_path, &target, PageOrder::Lexical).unwrap();

        let mut on_disk: Vec<String> = fs::read_dir(&target)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        on_disk.sort();
        assert_eq!(on_disk, vec!["01.png", "02.webp"]);
        assert_eq!(report.written.len(), 2);
    }

    #[test]
    fn later_entry_wins_on_base_name_collision() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("demo.zip");
        create_zip(&archive_path, &[("b/cover.png", "second"), ("a/cover.png", "first")]);
        let target = dir.path().join("out");
        fs::create_dir(&target).unwrap();

        let report =
            extract_archive(ArchiveKind::Zip, &archive_path, &target, PageOrder::Lexical).unwrap();

        assert_eq!(report.written, vec![target.join("cover.png")]);
        assert_eq!(report.overwritten, 1);
        assert_eq!(fs::read(target.join("cover.png")).unwrap(), b"second");
    }

    #[test]
    fn corrupt_archive_is_an_error() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("broken.zip");
        fs::write(&archive_path, b"definitely not a zip").unwrap();

        let err = extract_archive(ArchiveKind::Zip, &archive_path, dir.path(), PageOrder::Lexical)
            .unwrap_err();
        assert!(format!("{err:#}").contains("zip directory"));
    }

    // Stored entries, in archive order: p/02.png, p/01.jpg, notes.txt, b/cover.png, a/cover.png.
    #[cfg(feature = "rar")]
    const COLLISIONS_CBR: &[u8] = include_bytes!("../../tests/fixtures/collisions.cbr");

    #[cfg(feature = "rar")]
    #[test]
    fn rar_pages_are_flattened_and_sorted() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("demo.cbr");
        fs::write(&archive_path, COLLISIONS_CBR).unwrap();
        let target = dir.path().join("out");
        fs::create_dir(&target).unwrap();

        let report =
            extract_archive(ArchiveKind::Rar, &archive_path, &target, PageOrder::Lexical).unwrap();

        assert_eq!(
            report.written,
            vec![target.join("cover.png"), target.join("01.jpg"), target.join("02.png")]
        );
        assert_eq!(report.skipped, 1);
        assert_eq!(report.overwritten, 1);
        assert_eq!(fs::read(target.join("cover.png")).unwrap(), b"second");
        assert_eq!(fs::read(target.join("01.jpg")).unwrap(), b"one");
        assert!(!target.join("notes.txt").exists());

        let mut on_disk: Vec<String> = fs::read_dir(&target)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        on_disk.sort();
        assert_eq!(on_disk, vec!["01.jpg", "02.png", "cover.png"]);
    }

    fn create_zip(path: &Path, files: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for &(name, contents) in files {
            if name.ends_with('/') {
                zip.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                zip.start_file(name, options).unwrap();
                zip.write_all(contents.as_bytes()).unwrap();
            }
        }

        zip.finish().unwrap();
    }
}
