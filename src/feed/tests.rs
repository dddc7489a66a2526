//! Tests for the feed module

use super::*;
use crate::error::{Error, Result};
use crate::fetcher::PageSource;
use crate::pagination::{Page, StopCondition};
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use test_case::test_case;

/// In-memory list with optional injected failures
struct MemorySource {
    items: Vec<u32>,
    page_size: u32,
    stop: StopCondition,
    report_total: Option<u64>,
    failures: Mutex<Vec<u64>>,
    calls: AtomicUsize,
}

impl MemorySource {
    fn new(len: u32, page_size: u32) -> Self {
        Self {
            items: (0..len).collect(),
            page_size,
            stop: StopCondition::ShortPageOrTotal,
            report_total: None,
            failures: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn with_total(mut self, total: u64) -> Self {
        self.report_total = Some(total);
        self
    }

    fn failing_once_at(self, offset: u64) -> Self {
        self.failures.lock().unwrap().push(offset);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource<u32> for MemorySource {
    async fn try_fetch_page(&self, _parent_id: &str, limit: u32, offset: u64) -> Result<Page<u32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut failures = self.failures.lock().unwrap();
        if let Some(pos) = failures.iter().position(|o| *o == offset) {
            failures.remove(pos);
            return Err(Error::http_status(503, "unavailable"));
        }

        let start = (offset as usize).min(self.items.len());
        let end = (start + limit as usize).min(self.items.len());
        Ok(Page::new(self.items[start..end].to_vec(), limit, offset).with_total(self.report_total))
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn stop_condition(&self) -> StopCondition {
        self.stop
    }
}

#[test]
fn test_begin_load_is_exclusive() {
    let mut feed: ListFeed<u32> = ListFeed::new("p", 10, StopCondition::default());
    assert_eq!(feed.state(), FeedState::Idle);

    let request = feed.begin_load().unwrap();
    assert_eq!(request.offset, 0);
    assert_eq!(request.limit, 10);
    assert_eq!(feed.state(), FeedState::LoadingFirstPage);
    assert!(feed.begin_load().is_none());

    let completion = feed.complete(&request, Ok(Page::new((0..10).collect(), 10, 0)));
    assert!(matches!(completion, Completion::Applied(FeedState::Ready)));

    let next = feed.begin_load().unwrap();
    assert_eq!(next.offset, 10);
    assert_eq!(feed.state(), FeedState::LoadingNextPage);
}

#[test]
fn test_short_page_exhausts() {
    let mut feed: ListFeed<u32> = ListFeed::new("p", 10, StopCondition::default());
    let request = feed.begin_load().unwrap();
    let completion = feed.complete(&request, Ok(Page::new(vec![1, 2, 3], 10, 0)));

    assert!(matches!(completion, Completion::Applied(FeedState::Exhausted)));
    assert!(!feed.has_next_page());
    assert!(feed.begin_load().is_none());
}

#[test]
fn test_total_reached_exhausts() {
    let mut feed: ListFeed<u32> = ListFeed::new("p", 2, StopCondition::ShortPageOrTotal);
    let request = feed.begin_load().unwrap();
    let page = Page::new(vec![1, 2], 2, 0).with_total(Some(2));
    assert!(matches!(
        feed.complete(&request, Ok(page)),
        Completion::Applied(FeedState::Exhausted)
    ));

    let mut feed: ListFeed<u32> = ListFeed::new("p", 2, StopCondition::ShortPage);
    let request = feed.begin_load().unwrap();
    let page = Page::new(vec![1, 2], 2, 0).with_total(Some(2));
    assert!(matches!(
        feed.complete(&request, Ok(page)),
        Completion::Applied(FeedState::Ready)
    ));
}

#[test]
fn test_stale_completion_is_discarded() {
    let mut feed: ListFeed<u32> = ListFeed::new("store-a", 5, StopCondition::default());
    let old = feed.begin_load().unwrap();

    feed.reset("store-b");
    assert_eq!(feed.generation(), 1);
    assert_eq!(feed.parent_id(), "store-b");
    let current = feed.begin_load().unwrap();

    let stale = feed.complete(&old, Ok(Page::new(vec![9, 9, 9, 9, 9], 5, 0)));
    assert!(matches!(stale, Completion::Stale));
    assert!(feed.pages().is_empty());
    assert_eq!(feed.state(), FeedState::LoadingFirstPage);

    feed.complete(&current, Ok(Page::new(vec![1], 5, 0)));
    assert_eq!(feed.items().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_completion_without_claim_is_stale() {
    let mut feed: ListFeed<u32> = ListFeed::new("p", 5, StopCondition::default());
    let request = PageRequest {
        generation: 0,
        parent_id: "p".into(),
        offset: 0,
        limit: 5,
    };
    assert!(matches!(
        feed.complete(&request, Ok(Page::new(vec![1], 5, 0))),
        Completion::Stale
    ));
    assert_eq!(feed.state(), FeedState::Idle);
}

#[test]
fn test_failure_keeps_pages_and_retries_same_offset() {
    let mut feed: ListFeed<u32> = ListFeed::new("p", 2, StopCondition::default());
    let first = feed.begin_load().unwrap();
    feed.complete(&first, Ok(Page::new(vec![1, 2], 2, 0)));

    let second = feed.begin_load().unwrap();
    let completion = feed.complete(&second, Err(Error::http_status(500, "down")));
    assert!(matches!(completion, Completion::Failed(Error::HttpStatus { status: 500, .. })));
    assert_eq!(feed.state(), FeedState::Failed);
    assert!(feed.failure().is_some());
    assert_eq!(feed.pages().fetched(), 2);

    let retry = feed.begin_load().unwrap();
    assert_eq!(retry.offset, second.offset);
    assert_eq!(feed.state(), FeedState::LoadingNextPage);
}

#[test]
fn test_zero_page_size_never_loads() {
    let mut feed: ListFeed<u32> = ListFeed::new("p", 0, StopCondition::default());
    assert!(!feed.has_next_page());
    assert!(feed.begin_load().is_none());
    assert_eq!(feed.state(), FeedState::Exhausted);
}

#[tokio::test]
async fn test_load_next_walks_list() {
    let source = MemorySource::new(5, 2);
    let mut feed = ListFeed::for_source("p", &source);

    assert_eq!(feed.load_next(&source).await.unwrap(), FeedState::Ready);
    assert_eq!(feed.load_next(&source).await.unwrap(), FeedState::Ready);
    assert_eq!(feed.load_next(&source).await.unwrap(), FeedState::Exhausted);
    assert_eq!(feed.load_next(&source).await.unwrap(), FeedState::Exhausted);
    assert_eq!(source.calls(), 3);
    assert_eq!(feed.into_items(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_load_next_reports_failure_then_recovers() {
    let source = MemorySource::new(4, 2).failing_once_at(2);
    let mut feed = ListFeed::for_source("p", &source);

    feed.load_next(&source).await.unwrap();
    let err = feed.load_next(&source).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(feed.state(), FeedState::Failed);

    let fetches = feed.drain(&source, 10).await.unwrap();
    assert_eq!(fetches, 2);
    assert_eq!(feed.state(), FeedState::Exhausted);
    assert_eq!(feed.into_items(), vec![0, 1, 2, 3]);
}

#[test_case(0, 5 ; "empty list")]
#[test_case(10, 5 ; "exact multiple")]
#[test_case(11, 5 ; "partial last page")]
#[test_case(1, 1 ; "single item pages")]
#[test_case(97, 24 ; "site page size")]
#[tokio::test]
async fn test_drain_terminates_within_bound(size: u32, page_size: u32) {
    let source = MemorySource::new(size, page_size);
    let mut feed = ListFeed::for_source("p", &source);

    let fetches = feed.drain(&source, 1_000).await.unwrap();
    let bound = size.div_ceil(page_size) as usize + 1;
    assert!(fetches <= bound, "{fetches} fetches exceeds {bound}");
    assert_eq!(feed.state(), FeedState::Exhausted);
    assert_eq!(feed.into_items(), (0..size).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_drain_stops_on_total() {
    let source = MemorySource::new(10, 5).with_total(10);
    let mut feed = ListFeed::for_source("p", &source);
    assert_eq!(feed.drain(&source, 100).await.unwrap(), 2);
}

#[tokio::test]
async fn test_drain_respects_max_fetches() {
    let source = MemorySource::new(100, 10);
    let mut feed = ListFeed::for_source("p", &source);
    assert_eq!(feed.drain(&source, 3).await.unwrap(), 3);
    assert_eq!(feed.state(), FeedState::Ready);
    assert_eq!(feed.pages().fetched(), 30);
}

// ============================================================================
// Page stream
// ============================================================================

#[tokio::test]
async fn test_page_stream_yields_all_pages() {
    let source = MemorySource::new(7, 3);
    let pages: Vec<_> = page_stream(&source, "p", 100).collect().await;

    assert_eq!(pages.len(), 3);
    let items: Vec<u32> = pages
        .into_iter()
        .flat_map(|page| page.unwrap().items)
        .collect();
    assert_eq!(items, (0..7).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_page_stream_ends_after_error() {
    let source = MemorySource::new(9, 3).failing_once_at(3);
    let pages: Vec<_> = page_stream(&source, "p", 100).collect().await;

    assert_eq!(pages.len(), 2);
    assert!(pages[0].is_ok());
    assert!(pages[1].is_err());
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_page_stream_bounded() {
    let source = MemorySource::new(50, 5);
    let count = page_stream(&source, "p", 4).count().await;
    assert_eq!(count, 4);
}
