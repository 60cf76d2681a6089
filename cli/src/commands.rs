use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use shelf_core::{
    ComicItem, ComicList, ImportError, ImportOutcome, Library, LibraryConfig, ShelfState,
    ViewerSession,
};

use crate::Command;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PagesReport<'a> {
    name: &'a str,
    folder_path: &'a Path,
    pages: &'a [PathBuf],
}

pub async fn run(command: Command, config: LibraryConfig) -> Result<()> {
    let library = Library::new(config);
    let state = ShelfState::default().replace_comics(library.refresh().await?);

    match command {
        Command::List { query, json } => list(state.comics(), query.as_deref().unwrap_or(""), json),
        Command::ImportFolder { path } => {
            let state = state.begin_import();
            let result = library.import_folder(state.comics(), &path).await;
            finish_import(state, result)
        }
        Command::ImportArchive { path } => {
            let state = state.begin_import();
            let result = library.import_archive(&path).await;
            finish_import(state, result)
        }
        Command::Pages { name, json } => {
            let item = find(state.comics(), &name)?;
            let pages = library.load_pages(item).await;
            if json {
                let report =
                    PagesReport { name: &item.name, folder_path: &item.folder_path, pages: &pages };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for page in &pages {
                    println!("{}", page.display());
                }
            }
            Ok(())
        }
        Command::Read { name, page } => {
            let item = find(state.comics(), &name)?;
            let mut viewer = ViewerSession::new();
            viewer.open(item.name.clone());
            viewer.pages_loaded(library.load_pages(item).await);
            viewer.go_to(page.saturating_sub(1));

            println!("{}", viewer.caption());
            match viewer.current_page() {
                Some(path) => println!("{}", path.display()),
                None => println!("(no pages)"),
            }
            viewer.close();
            Ok(())
        }
    }
}

fn list(comics: &ComicList, query: &str, json: bool) -> Result<()> {
    let shown = comics.filter(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&shown).context("serialising comic list")?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("no comics found");
        return Ok(());
    }
    for (position, item) in shown.iter().enumerate() {
        println!("{:>3}. {}", position + 1, describe(item));
    }
    Ok(())
}

fn finish_import(state: ShelfState, result: Result<ImportOutcome, ImportError>) -> Result<()> {
    let state = state.finish_import(&result);
    match result {
        Ok(outcome) => {
            println!("imported {} pages into {}", outcome.pages, outcome.folder.display());
            println!("{} comics in library", state.comics().len());
            Ok(())
        }
        Err(err @ ImportError::Duplicate { .. }) => {
            println!("{err}");
            Ok(())
        }
        Err(err) => {
            tracing::debug!(phase = %state.phase(), "import did not complete");
            Err(anyhow::Error::new(err).context("import failed"))
        }
    }
}

fn find<'a>(comics: &'a ComicList, name: &str) -> Result<&'a ComicItem> {
    comics.find_by_name(name).ok_or_else(|| anyhow!("no comic named {name:?} in the library"))
}

fn describe(item: &ComicItem) -> String {
    let pages = if item.image_count == 1 { "page" } else { "pages" };
    format!("{} ({} {pages})", item.name, item.image_count)
}
