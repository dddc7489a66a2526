//! Pagination module
//!
//! Offset/limit pagination for infinite-scroll lists.
//!
//! # Overview
//!
//! A list is walked as a [`PageSequence`] of fixed-size [`Page`]s. The next
//! offset is never stored: it is the number of items fetched so far. Whether
//! another page exists is decided by [`next_page_offset`]. A short page ends
//! the list. A reported total ends it too when the list's [`StopCondition`]
//! honors totals.

mod strategies;
mod types;

pub use strategies::{has_next_page, next_offset_after, next_page_offset, OffsetPaginator};
pub use types::{Page, PageSequence, StopCondition};

#[cfg(test)]
mod tests;
