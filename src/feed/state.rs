//! List feed state machine

use crate::error::{Error, Result};
use crate::fetcher::PageSource;
use crate::pagination::{next_page_offset, Page, PageSequence, StopCondition};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Loading state of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedState {
    /// Nothing requested yet
    Idle,
    /// First page in flight
    LoadingFirstPage,
    /// At least one page loaded, more may follow
    Ready,
    /// A later page in flight
    LoadingNextPage,
    /// No further pages
    Exhausted,
    /// Last fetch failed; the same offset can be retried
    Failed,
}

impl FeedState {
    /// Whether a fetch is in flight
    pub fn is_loading(self) -> bool {
        matches!(self, Self::LoadingFirstPage | Self::LoadingNextPage)
    }
}

impl fmt::Display for FeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::LoadingFirstPage => "loading_first_page",
            Self::Ready => "ready",
            Self::LoadingNextPage => "loading_next_page",
            Self::Exhausted => "exhausted",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A page request handed out by [`ListFeed::begin_load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Feed generation the request belongs to
    pub generation: u64,
    /// Parent entity id
    pub parent_id: String,
    /// Starting position
    pub offset: u64,
    /// Page size
    pub limit: u32,
}

/// Outcome of [`ListFeed::complete`]
#[derive(Debug)]
pub enum Completion {
    /// Page appended; the feed is now in this state
    Applied(FeedState),
    /// Fetch failed; the feed is now `Failed`
    Failed(Error),
    /// Result belonged to an earlier generation or no fetch was in flight
    Stale,
}

/// Pages loaded for one list view
#[derive(Debug)]
pub struct ListFeed<T> {
    parent_id: String,
    page_size: u32,
    stop: StopCondition,
    generation: u64,
    state: FeedState,
    pages: PageSequence<T>,
    failure: Option<String>,
}

impl<T> ListFeed<T> {
    /// Create an idle feed
    pub fn new(parent_id: impl Into<String>, page_size: u32, stop: StopCondition) -> Self {
        Self {
            parent_id: parent_id.into(),
            page_size,
            stop,
            generation: 0,
            state: FeedState::Idle,
            pages: PageSequence::new(),
            failure: None,
        }
    }

    /// Create an idle feed using a source's page size and stop condition
    pub fn for_source<S>(parent_id: impl Into<String>, source: &S) -> Self
    where
        T: Send + 'static,
        S: PageSource<T> + ?Sized,
    {
        Self::new(parent_id, source.page_size(), source.stop_condition())
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Pages loaded so far
    pub fn pages(&self) -> &PageSequence<T> {
        &self.pages
    }

    /// Items loaded so far, in order
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.items()
    }

    /// Consume the feed, keeping its items
    pub fn into_items(self) -> Vec<T> {
        self.pages.into_items()
    }

    /// Message of the last failed fetch, while `Failed`
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Whether another page may be requested
    pub fn has_next_page(&self) -> bool {
        self.state != FeedState::Exhausted && self.next_offset().is_some()
    }

    fn next_offset(&self) -> Option<u64> {
        if self.page_size == 0 {
            return None;
        }
        if self.pages.is_empty() {
            return Some(0);
        }
        next_page_offset(self.pages.last(), self.pages.pages(), self.stop)
    }

    /// Claim the next fetch.
    ///
    /// Returns `None` while a fetch is in flight or when the list is done.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.state.is_loading() || self.state == FeedState::Exhausted {
            return None;
        }

        let Some(offset) = self.next_offset() else {
            self.state = FeedState::Exhausted;
            return None;
        };

        self.state = if self.pages.is_empty() {
            FeedState::LoadingFirstPage
        } else {
            FeedState::LoadingNextPage
        };

        Some(PageRequest {
            generation: self.generation,
            parent_id: self.parent_id.clone(),
            offset,
            limit: self.page_size,
        })
    }

    /// Apply the result of a fetch claimed with [`begin_load`](Self::begin_load)
    pub fn complete(&mut self, request: &PageRequest, result: Result<Page<T>>) -> Completion {
        if request.generation != self.generation || !self.state.is_loading() {
            debug!(
                parent_id = %request.parent_id,
                offset = request.offset,
                request_generation = request.generation,
                generation = self.generation,
                "discarding stale page"
            );
            return Completion::Stale;
        }

        match result {
            Ok(page) => {
                self.failure = None;
                self.pages.push(page);
                self.state = if self.next_offset().is_some() {
                    FeedState::Ready
                } else {
                    FeedState::Exhausted
                };
                Completion::Applied(self.state)
            }
            Err(e) => {
                warn!(
                    parent_id = %self.parent_id,
                    offset = request.offset,
                    error = %e,
                    "feed fetch failed"
                );
                self.failure = Some(e.to_string());
                self.state = FeedState::Failed;
                Completion::Failed(e)
            }
        }
    }

    /// Start over for a new parent; in-flight results become stale
    pub fn reset(&mut self, parent_id: impl Into<String>) {
        self.parent_id = parent_id.into();
        self.generation += 1;
        self.pages.clear();
        self.failure = None;
        self.state = FeedState::Idle;
    }

    /// Fetch and apply the next page, if any
    pub async fn load_next<S>(&mut self, source: &S) -> Result<FeedState>
    where
        T: Send + 'static,
        S: PageSource<T> + ?Sized,
    {
        let Some(request) = self.begin_load() else {
            return Ok(self.state);
        };

        let result = source
            .try_fetch_page(&request.parent_id, request.limit, request.offset)
            .await;

        match self.complete(&request, result) {
            Completion::Applied(state) => Ok(state),
            Completion::Failed(e) => Err(e),
            Completion::Stale => Ok(self.state),
        }
    }

    /// Load pages until the list is exhausted or `max_fetches` fetches ran.
    ///
    /// Returns the number of fetches issued.
    pub async fn drain<S>(&mut self, source: &S, max_fetches: usize) -> Result<usize>
    where
        T: Send + 'static,
        S: PageSource<T> + ?Sized,
    {
        let mut fetches = 0;
        while fetches < max_fetches && self.has_next_page() {
            fetches += 1;
            self.load_next(source).await?;
        }

        debug!(
            parent_id = %self.parent_id,
            fetches,
            items = self.pages.fetched(),
            state = %self.state,
            "feed drained"
        );
        Ok(fetches)
    }
}
