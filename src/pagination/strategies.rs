//! Offset pagination strategy
//!
//! Computes request parameters and the next offset for offset/limit lists.

use super::types::{Page, PageSequence, StopCondition};

/// Decide the offset of the next page.
///
/// Rules, in precedence order:
/// 1. no last page: done
/// 2. last page shorter than its limit: done
/// 3. total known and honored, and fetched >= total: done
/// 4. otherwise continue at the cumulative fetched count
pub fn next_page_offset<T>(
    last: Option<&Page<T>>,
    pages: &[Page<T>],
    stop: StopCondition,
) -> Option<u64> {
    let last = last?;

    if last.limit == 0 || last.is_short() {
        return None;
    }

    let fetched: u64 = pages.iter().map(|p| p.items.len() as u64).sum();

    if stop.honors_total() {
        if let Some(total) = last.total {
            if fetched >= total {
                return None;
            }
        }
    }

    Some(fetched)
}

/// Whether another page should be fetched for this sequence
pub fn has_next_page<T>(sequence: &PageSequence<T>, stop: StopCondition) -> bool {
    next_page_offset(sequence.last(), sequence.pages(), stop).is_some()
}

/// Offset following a single page, assuming everything before it was fetched.
///
/// Same rules as [`next_page_offset`], with the page's own offset counted as
/// already fetched. Used when a caller holds one page rather than a sequence.
pub fn next_offset_after<T>(page: &Page<T>, stop: StopCondition) -> Option<u64> {
    if page.limit == 0 || page.is_short() {
        return None;
    }

    let end = page.offset.checked_add(page.items.len() as u64)?;
    match page.total {
        Some(total) if stop.honors_total() && end >= total => None,
        _ => Some(end),
    }
}

/// Offset-based pagination (`?limit=24&offset=48`, `?size=24&from=48`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPaginator {
    /// Query parameter name for limit
    pub limit_param: String,
    /// Query parameter name for offset
    pub offset_param: String,
    /// Number of items per page
    pub limit: u32,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(
        limit_param: impl Into<String>,
        offset_param: impl Into<String>,
        limit: u32,
        stop_condition: StopCondition,
    ) -> Self {
        Self {
            limit_param: limit_param.into(),
            offset_param: offset_param.into(),
            limit,
            stop_condition,
        }
    }

    /// Override the page size
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Query parameters for a page request
    pub fn params(&self, limit: u32, offset: u64) -> Vec<(String, String)> {
        vec![
            (self.limit_param.clone(), limit.to_string()),
            (self.offset_param.clone(), offset.to_string()),
        ]
    }
}
