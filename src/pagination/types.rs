//! Pagination types
//!
//! Defines the page model shared by fetchers, feeds and the server.

use serde::{Deserialize, Serialize};

/// One bounded fetch result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in backend order
    pub items: Vec<T>,
    /// Requested page size
    pub limit: u32,
    /// Requested starting position
    pub offset: u64,
    /// Backend-reported count of all matching items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Create a page without a reported total
    pub fn new(items: Vec<T>, limit: u32, offset: u64) -> Self {
        Self {
            items,
            limit,
            offset,
            total: None,
        }
    }

    /// Create an empty page, the fail-soft result of a failed fetch
    pub fn empty(limit: u32, offset: u64) -> Self {
        Self::new(Vec::new(), limit, offset)
    }

    /// Set the reported total
    #[must_use]
    pub fn with_total(mut self, total: Option<u64>) -> Self {
        self.total = total;
        self
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the backend returned fewer items than requested
    pub fn is_short(&self) -> bool {
        (self.items.len() as u64) < u64::from(self.limit)
    }

    /// Convert the item type, keeping pagination metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            limit: self.limit,
            offset: self.offset,
            total: self.total,
        }
    }
}

/// Pages accumulated for one list, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSequence<T> {
    pages: Vec<Page<T>>,
}

impl<T> Default for PageSequence<T> {
    fn default() -> Self {
        Self { pages: Vec::new() }
    }
}

impl<T> PageSequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page
    pub fn push(&mut self, page: Page<T>) {
        self.pages.push(page);
    }

    /// Most recent page
    pub fn last(&self) -> Option<&Page<T>> {
        self.pages.last()
    }

    /// All pages
    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    /// Number of pages fetched
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page has been fetched yet
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Cumulative number of items across all pages
    pub fn fetched(&self) -> u64 {
        self.pages.iter().map(|p| p.items.len() as u64).sum()
    }

    /// Iterate over all items in order
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|p| p.items.iter())
    }

    /// Concatenate all items
    pub fn into_items(self) -> Vec<T> {
        self.pages.into_iter().flat_map(|p| p.items).collect()
    }

    /// Drop all pages
    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

/// When a list is considered exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCondition {
    /// Stop only on a short page
    ShortPage,

    /// Stop on a short page, or once the reported total has been fetched
    #[default]
    ShortPageOrTotal,
}

impl StopCondition {
    /// Whether a reported total can end the list
    pub fn honors_total(self) -> bool {
        matches!(self, Self::ShortPageOrTotal)
    }
}
