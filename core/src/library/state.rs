//! Browsing-session state owned by the presentation layer.

use std::fmt;

use crate::error::ImportError;

use super::{ComicList, ImportOutcome};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImportPhase {
    #[default]
    Idle,
    /// Copy or extraction running; the visible list is still the previous one.
    Importing,
    /// Last import failed; the list was left as it was.
    Failed(String),
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportPhase::Idle => f.write_str("idle"),
            ImportPhase::Importing => f.write_str("importing"),
            ImportPhase::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// The comic list shown on screen together with the import phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfState {
    comics: ComicList,
    phase: ImportPhase,
}

impl ShelfState {
    pub fn new(comics: ComicList) -> Self {
        Self { comics, phase: ImportPhase::Idle }
    }

    pub fn comics(&self) -> &ComicList {
        &self.comics
    }

    pub fn phase(&self) -> &ImportPhase {
        &self.phase
    }

    pub fn is_importing(&self) -> bool {
        self.phase == ImportPhase::Importing
    }

    pub fn begin_import(self) -> Self {
        Self { phase: ImportPhase::Importing, ..self }
    }

    /// Apply a finished import: replace the list on success, keep it on failure.
    pub fn finish_import(self, result: &Result<ImportOutcome, ImportError>) -> Self {
        match result {
            Ok(outcome) => Self { comics: outcome.comics.clone(), phase: ImportPhase::Idle },
            Err(err) => Self { phase: ImportPhase::Failed(err.to_string()), ..self },
        }
    }

    /// Replace the list after a plain rescan, leaving the import phase alone.
    pub fn replace_comics(self, comics: ComicList) -> Self {
        Self { comics, ..self }
    }
}
