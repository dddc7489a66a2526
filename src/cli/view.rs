//! Serializable page view shared by the CLI and the server

use crate::catalog::ListKind;
use crate::pagination::{next_offset_after, Page, StopCondition};
use serde::Serialize;

/// One page of a list plus the offset of the page after it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<T> {
    pub kind: ListKind,
    pub parent_id: String,
    pub offset: u64,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// `null` once the list is exhausted
    pub next_offset: Option<u64>,
    pub items: Vec<T>,
}

impl<T> PageView<T> {
    pub fn new(kind: ListKind, parent_id: impl Into<String>, page: Page<T>, stop: StopCondition) -> Self {
        let next_offset = next_offset_after(&page, stop);
        Self {
            kind,
            parent_id: parent_id.into(),
            offset: page.offset,
            limit: page.limit,
            total: page.total,
            next_offset,
            items: page.items,
        }
    }
}
