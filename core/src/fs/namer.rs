//! Collision-free folder naming inside the storage root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::Result;

/// Candidate path for the `attempt`-th try: `name`, then `name(1)`, `name(2)`, ...
fn candidate(root: &Path, name: &str, attempt: u32) -> PathBuf {
    if attempt == 0 { root.join(name) } else { root.join(format!("{name}({attempt})")) }
}

/// First path under `root` derived from `name` that does not exist yet.
///
/// Only a probe: another writer may claim the name before the caller creates it. Use
/// [`create_unique_folder`] when the folder is about to be written.
pub fn unique_folder_name(root: &Path, name: &str) -> PathBuf {
    let mut attempt = 0;
    loop {
        let path = candidate(root, name, attempt);
        if !path.exists() {
            return path;
        }
        attempt += 1;
    }
}

/// Create and return a fresh, empty folder under `root` named after `name`.
///
/// `create_dir` fails with `AlreadyExists` when another import got there first, in which case
/// the next suffix is tried.
pub fn create_unique_folder(root: &Path, name: &str) -> Result<PathBuf> {
    let mut attempt = 0;
    loop {
        let path = candidate(root, name, attempt);
        match fs::create_dir(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "allocated comic folder");
                return Ok(path);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(err) => {
                return Err(err).with_context(|| format!("creating folder {}", path.display()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_name_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_folder_name(dir.path(), "Foo"), dir.path().join("Foo"));
    }

    #[test]
    fn third_request_gets_second_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Foo")).unwrap();
        fs::create_dir(dir.path().join("Foo(1)")).unwrap();

        assert_eq!(unique_folder_name(dir.path(), "Foo"), dir.path().join("Foo(2)"));
        let created = create_unique_folder(dir.path(), "Foo").unwrap();
        assert_eq!(created, dir.path().join("Foo(2)"));
        assert!(created.is_dir());
    }

    #[test]
    fn repeated_creation_never_reuses_a_folder() {
        let dir = tempfile::tempdir().unwrap();
        let first = create_unique_folder(dir.path(), "Bar").unwrap();
        let second = create_unique_folder(dir.path(), "Bar").unwrap();
        let third = create_unique_folder(dir.path(), "Bar").unwrap();

        assert_eq!(first, dir.path().join("Bar"));
        assert_eq!(second, dir.path().join("Bar(1)"));
        assert_eq!(third, dir.path().join("Bar(2)"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_unique_folder(&dir.path().join("absent"), "Baz").unwrap_err();
        assert!(err.to_string().contains("creating folder"));
    }
}
