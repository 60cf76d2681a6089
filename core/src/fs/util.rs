use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::types::PageOrder;

use super::Result;

/// Page image extensions (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Prefix of the AppleDouble resource-fork files macOS leaves inside archives.
const RESOURCE_FORK_PREFIX: &str = "._";

/// Returns whether a bare file name denotes a displayable page.
pub fn is_image_name(name: &str) -> bool {
    if name.starts_with(RESOURCE_FORK_PREFIX) {
        return false;
    }
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Applies [`is_image_name`] to the final component of `path`.
pub fn is_supported_image(path: &Path) -> bool {
    path.file_name().and_then(OsStr::to_str).map(is_image_name).unwrap_or(false)
}

/// Resolve `path` against the current directory without touching the file system.
///
/// Only an empty path cannot be made absolute; it is returned unchanged.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// List image files directly inside `dir`, returning paths joined onto `dir` in `order`.
pub fn list_image_files(dir: &Path, order: PageOrder) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let listing =
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in listing {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if is_supported_image(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| compare_file_names(order, a, b));
    Ok(files)
}

/// Compare two paths by file name using the configured ordering.
pub fn compare_file_names(order: PageOrder, a: &Path, b: &Path) -> Ordering {
    let a_name = a.file_name().unwrap_or(a.as_os_str()).to_string_lossy();
    let b_name = b.file_name().unwrap_or(b.as_os_str()).to_string_lossy();
    compare_names(order, &a_name, &b_name)
}

pub fn compare_names(order: PageOrder, a: &str, b: &str) -> Ordering {
    match order {
        PageOrder::Lexical => a.cmp(b),
        PageOrder::Natural => {
            natural_cmp(&a.to_lowercase(), &b.to_lowercase()).then_with(|| a.cmp(b))
        }
    }
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_tokens = tokenize(a);
    let b_tokens = tokenize(b);

    for (a_tok, b_tok) in a_tokens.iter().zip(b_tokens.iter()) {
        match (a_tok, b_tok) {
            (Token::Number(a_digits, a_val), Token::Number(b_digits, b_val)) => {
                match a_val.cmp(b_val) {
                    Ordering::Equal => match a_digits.len().cmp(&b_digits.len()) {
                        Ordering::Equal => {}
                        other => return other,
                    },
                    other => return other,
                }
            }
            (Token::Text(a_text), Token::Text(b_text)) => match a_text.cmp(b_text) {
                Ordering::Equal => {}
                other => return other,
            },
            (Token::Number(..), Token::Text(..)) => return Ordering::Less,
            (Token::Text(..), Token::Number(..)) => return Ordering::Greater,
        }
    }

    a_tokens.len().cmp(&b_tokens.len()).then_with(|| a.cmp(b))
}

#[derive(Debug, PartialEq)]
pub enum Token<'a> {
    Text(&'a str),
    Number(&'a str, u128),
}

pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut chars = input.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch.is_ascii_digit() {
            if start < idx {
                tokens.push(Token::Text(&input[start..idx]));
            }
            let mut end = idx + ch.len_utf8();
            while let Some(&(nidx, nch)) = chars.peek() {
                if nch.is_ascii_digit() {
                    chars.next();
                    end = nidx + nch.len_utf8();
                } else {
                    break;
                }
            }
            let digits = &input[idx..end];
            let value = digits.parse::<u128>().unwrap_or(0);
            tokens.push(Token::Number(digits, value));
            start = end;
        }
    }

    if start < input.len() {
        tokens.push(Token::Text(&input[start..]));
    }

    tokens
}

/// Reduce an archive entry path to the bare file name it is written under.
///
/// Entry names are normalised to `/` separators first so archives produced on Windows flatten
/// the same way. Directory components are dropped, which also keeps writes inside the target.
pub fn entry_base_name(entry: &str) -> Option<String> {
    let normalized = entry.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
