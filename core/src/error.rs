//! Errors surfaced at the import/scan operation boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by an import, carried back to the presentation layer instead of panicking.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported archive format for {name:?}; expected .zip, .cbz, .rar or .cbr")]
    UnsupportedFormat { name: String },

    #[error("comic {name:?} with {image_count} images is already in the library")]
    Duplicate { name: String, image_count: usize },

    #[error("storage root {} is unavailable", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("background worker failed")]
    Worker(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl ImportError {
    /// Whether the import was refused before any file was written.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ImportError::UnsupportedFormat { .. } | ImportError::Duplicate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_the_comic() {
        let err = ImportError::Duplicate { name: "Akira".into(), image_count: 12 };
        assert!(err.to_string().contains("Akira"));
        assert!(err.is_rejection());
    }

    #[test]
    fn wrapped_failures_keep_context_chain() {
        let inner = anyhow::anyhow!("disk full").context("writing 001.png");
        let err = ImportError::from(inner);
        assert_eq!(err.to_string(), "writing 001.png");
        assert!(!err.is_rejection());
    }
}
