//! Page-by-page viewing session for a single comic.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewerState {
    #[default]
    Closed,
    LoadingImages,
    Viewing { index: usize },
}

/// Drives `Closed → LoadingImages → Viewing(index) → Closed` for one comic.
#[derive(Debug, Clone, Default)]
pub struct ViewerSession {
    title: String,
    pages: Vec<PathBuf>,
    state: ViewerState,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Start loading `title`; any previously shown pages are dropped.
    pub fn open(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.pages.clear();
        self.state = ViewerState::LoadingImages;
    }

    /// Hand over the resolved pages and show the first one.
    ///
    /// Ignored unless a load is pending, so a late result cannot reopen a closed viewer.
    pub fn pages_loaded(&mut self, pages: Vec<PathBuf>) {
        if self.state != ViewerState::LoadingImages {
            return;
        }
        self.pages = pages;
        self.state = ViewerState::Viewing { index: 0 };
    }

    pub fn current_page(&self) -> Option<&Path> {
        match self.state {
            ViewerState::Viewing { index } => self.pages.get(index).map(PathBuf::as_path),
            _ => None,
        }
    }

    /// Advance one page; returns whether the index changed.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Go back one page; returns whether the index changed.
    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    /// Jump to `index`, clamped to the last page.
    pub fn go_to(&mut self, index: usize) {
        if let ViewerState::Viewing { .. } = self.state {
            let last = self.pages.len().saturating_sub(1);
            self.state = ViewerState::Viewing { index: index.min(last) };
        }
    }

    pub fn close(&mut self) {
        self.pages.clear();
        self.state = ViewerState::Closed;
    }

    /// Header text, e.g. `Akira (3/20)`.
    pub fn caption(&self) -> String {
        match self.state {
            ViewerState::Viewing { index } if !self.pages.is_empty() => {
                format!("{} ({}/{})", self.title, index + 1, self.pages.len())
            }
            ViewerState::Viewing { .. } => format!("{} (0/0)", self.title),
            ViewerState::LoadingImages => format!("{} (loading)", self.title),
            ViewerState::Closed => String::new(),
        }
    }

    fn step(&mut self, delta: isize) -> bool {
        let ViewerState::Viewing { index } = self.state else {
            return false;
        };
        let Some(next) = index.checked_add_signed(delta) else {
            return false;
        };
        if next >= self.pages.len() {
            return false;
        }
        self.state = ViewerState::Viewing { index: next };
        true
    }
}
