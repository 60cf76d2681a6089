//! Async front for the blocking pipeline.
//!
//! Every operation moves its file and archive I/O onto tokio's blocking pool and hands back a
//! future resolving to the result, so the caller decides when to await and when to swap the
//! visible list. Nothing here holds the list; it is passed in and a new one is returned.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task;
use tracing::error;

use crate::config::LibraryConfig;
use crate::error::ImportError;
use crate::types::ComicItem;

use super::{ComicList, ImportOutcome, import, loader};

/// Handle for submitting library work to the background pool.
#[derive(Debug, Clone)]
pub struct Library {
    config: Arc<LibraryConfig>,
}

impl Library {
    pub fn new(config: LibraryConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Rescan the storage root. Scan problems yield an empty list; only a lost worker errors.
    pub async fn refresh(&self) -> Result<ComicList, ImportError> {
        let config = Arc::clone(&self.config);
        Ok(task::spawn_blocking(move || import::refresh(&config)).await?)
    }

    /// Import the folder at `source`; `current` is used for the duplicate check.
    pub async fn import_folder(
        &self,
        current: &ComicList,
        source: impl Into<PathBuf>,
    ) -> Result<ImportOutcome, ImportError> {
        let config = Arc::clone(&self.config);
        let current = current.clone();
        let source = source.into();
        let outcome =
            task::spawn_blocking(move || import::import_folder(&config, &current, &source)).await?;
        outcome.inspect_err(log_failure)
    }

    /// Import the archive at `source`.
    pub async fn import_archive(
        &self,
        source: impl Into<PathBuf>,
    ) -> Result<ImportOutcome, ImportError> {
        let config = Arc::clone(&self.config);
        let source = source.into();
        let outcome =
            task::spawn_blocking(move || import::import_archive(&config, &source)).await?;
        outcome.inspect_err(log_failure)
    }

    /// Resolve the page paths of `item`. Failures resolve to an empty list.
    pub async fn load_pages(&self, item: &ComicItem) -> Vec<PathBuf> {
        let order = self.config.page_order;
        let item = item.clone();
        match task::spawn_blocking(move || loader::load_image_paths(&item, order)).await {
            Ok(paths) => paths,
            Err(err) => {
                error!(error = %err, "page loader task failed");
                Vec::new()
            }
        }
    }
}

fn log_failure(err: &ImportError) {
    match err {
        _ if err.is_rejection() => {}
        ImportError::Failed(inner) => error!(error = %format!("{inner:#}"), "import failed"),
        other => error!(error = %other, "import failed"),
    }
}
