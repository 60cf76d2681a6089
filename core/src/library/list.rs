//! The in-memory comic list and its live search filter.

use serde::Serialize;

use crate::types::{ComicId, ComicItem};

/// Ordered result of the last scan, owned by whoever drives the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComicList {
    items: Vec<ComicItem>,
}

impl ComicList {
    pub fn new(items: Vec<ComicItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ComicItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComicItem> {
        self.items.iter()
    }

    pub fn get(&self, id: &ComicId) -> Option<&ComicItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Look up an item by display name, as typed by a user.
    pub fn find_by_name(&self, name: &str) -> Option<&ComicItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Items whose name contains `query`, ignoring case. A blank query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&ComicItem> {
        if query.trim().is_empty() {
            return self.items.iter().collect();
        }
        let needle = query.to_lowercase();
        self.items.iter().filter(|item| item.name.to_lowercase().contains(&needle)).collect()
    }

    /// Whether an item with this exact name and page count is already listed.
    pub fn contains_duplicate(&self, name: &str, image_count: usize) -> bool {
        self.items.iter().any(|item| item.name == name && item.image_count == image_count)
    }
}

impl<'a> IntoIterator for &'a ComicList {
    type Item = &'a ComicItem;
    type IntoIter = std::slice::Iter<'a, ComicItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
