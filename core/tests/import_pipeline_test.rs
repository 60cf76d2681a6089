use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use shelf_core::{
    ComicList, ImportError, ImportPhase, Library, LibraryConfig, PageOrder, ShelfState,
};
use tempfile::TempDir;
use zip::CompressionMethod;
use zip::write::FileOptions;

fn library(base: &TempDir) -> Library {
    Library::new(
        LibraryConfig::default()
            .with_storage_root(base.path().join("ComicStorage"))
            .with_cache_dir(base.path().join("cache"))
            .with_page_order(PageOrder::Lexical),
    )
}

fn create_zip(path: &Path, files: &[&str]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);
    for &name in files {
        zip.start_file(name, options).unwrap();
        zip.write_all(name.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect()
}

#[tokio::test]
async fn archive_import_extracts_images_and_replaces_list() {
    let base = tempfile::tempdir().unwrap();
    let library = library(&base);
    let archive = base.path().join("Akira Vol 1.cbz");
    create_zip(&archive, &["p/03.png", "p/01.jpg", "p/02.webp", "info.txt", "ComicInfo.xml"]);

    let outcome = library.import_archive(&archive).await.unwrap();

    assert_eq!(outcome.folder, library.config().storage_root.join("Akira Vol 1"));
    assert_eq!(outcome.pages, 3);
    assert_eq!(outcome.comics.len(), 1);

    let item = &outcome.comics.items()[0];
    assert_eq!(item.name, "Akira Vol 1");
    assert_eq!(item.image_count, 3);

    let pages = library.load_pages(item).await;
    assert_eq!(file_names(&pages), vec!["01.jpg", "02.webp", "03.png"]);
    assert_eq!(item.thumbnail_path.as_deref(), Some(pages[0].as_path()));
}

#[tokio::test]
async fn cached_archive_copy_is_removed_after_import() {
    let base = tempfile::tempdir().unwrap();
    let library = library(&base);
    let archive = base.path().join("vol.zip");
    create_zip(&archive, &["1.png"]);

    library.import_archive(&archive).await.unwrap();

    let leftovers: Vec<_> = fs::read_dir(&library.config().cache_dir).unwrap().collect();
    assert!(leftovers.is_empty());
    assert!(archive.exists(), "source archive must be left alone");
}

#[tokio::test]
async fn importing_same_archive_twice_allocates_suffixed_folders() {
    let base = tempfile::tempdir().unwrap();
    let library = library(&base);
    let archive = base.path().join("Foo.zip");
    create_zip(&archive, &["1.png", "2.png"]);

    let first = library.import_archive(&archive).await.unwrap();
    let second = library.import_archive(&archive).await.unwrap();
    let third = library.import_archive(&archive).await.unwrap();

    let root = &library.config().storage_root;
    assert_eq!(first.folder, root.join("Foo"));
    assert_eq!(second.folder, root.join("Foo(1)"));
    assert_eq!(third.folder, root.join("Foo(2)"));
    assert_eq!(third.comics.len(), 3);
}

#[tokio::test]
async fn archive_without_images_leaves_empty_folder_out_of_list() {
    let base = tempfile::tempdir().unwrap();
    let library = library(&base);
    let archive = base.path().join("docs.zip");
    create_zip(&archive, &["readme.txt"]);

    let outcome = library.import_archive(&archive).await.unwrap();

    assert_eq!(outcome.pages, 0);
    assert!(outcome.folder.is_dir());
    assert!(outcome.comics.is_empty());
}

#[tokio::test]
async fn corrupt_archive_fails_and_keeps_state() {
    let base = tempfile::tempdir().unwrap();
    let library = library(&base);
    let archive = base.path().join("broken.cbz");
    fs::write(&archive, b"not a zip at all").unwrap();

    let state = ShelfState::new(ComicList::default()).begin_import();
    let result = library.import_archive(&archive).await;
    assert!(matches!(result, Err(ImportError::Failed(_))));

    let state = state.finish_import(&result);
    assert!(matches!(state.phase(), ImportPhase::Failed(_)));
    assert!(state.comics().is_empty());
}

#[tokio::test]
async fn duplicate_folder_import_is_rejected() {
    let base = tempfile::tempdir().unwrap();
    let library = library(&base);
    let source = base.path().join("picked").join("Berserk");
    fs::create_dir_all(&source).unwrap();
    for name in ["001.png", "002.png", "003.png"] {
        fs::write(source.join(name), b"page").unwrap();
    }

    let state = ShelfState::new(library.refresh().await.unwrap());
    let first = library.import_folder(state.comics(), &source).await;
    let state = state.begin_import().finish_import(&first);
    assert_eq!(state.comics().len(), 1);

    let second = library.import_folder(state.comics(), &source).await;
    assert!(matches!(second, Err(ImportError::Duplicate { image_count: 3, .. })));

    let state = state.begin_import().finish_import(&second);
    assert_eq!(state.comics().len(), 1);
    assert_eq!(library.refresh().await.unwrap(), *state.comics());
}

#[tokio::test]
async fn refresh_on_missing_storage_is_empty() {
    let base = tempfile::tempdir().unwrap();
    let library = library(&base);

    let list = library.refresh().await.unwrap();

    assert!(list.is_empty());
    assert!(!library.config().storage_root.exists());
}
