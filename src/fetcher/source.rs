//! Page source trait

use crate::error::Result;
use crate::pagination::{Page, StopCondition};
use async_trait::async_trait;
use tracing::warn;

/// Something that serves fixed-size pages of one list, keyed by parent id
#[async_trait]
pub trait PageSource<T: Send + 'static>: Send + Sync {
    /// Fetch one page, reporting transport and decode failures
    async fn try_fetch_page(&self, parent_id: &str, limit: u32, offset: u64) -> Result<Page<T>>;

    /// Fetch one page; any failure becomes an empty page without a total
    async fn fetch_page(&self, parent_id: &str, limit: u32, offset: u64) -> Page<T> {
        match self.try_fetch_page(parent_id, limit, offset).await {
            Ok(page) => page,
            Err(e) => {
                warn!(parent_id, limit, offset, error = %e, "page fetch failed, returning empty page");
                Page::empty(limit, offset)
            }
        }
    }

    /// Page size callers should request
    fn page_size(&self) -> u32;

    /// When this list is considered exhausted
    fn stop_condition(&self) -> StopCondition {
        StopCondition::default()
    }
}
