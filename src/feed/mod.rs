//! Feed module
//!
//! Drives one list view through its loading states.
//!
//! A [`ListFeed`] owns the pages loaded so far for one parent and decides
//! when another page may be requested. Requests carry the feed generation;
//! completions from an older generation are dropped rather than applied.
//! [`page_stream`] walks a whole list as a stream for batch callers.

mod state;
mod stream;

pub use state::{Completion, FeedState, ListFeed, PageRequest};
pub use stream::page_stream;

#[cfg(test)]
mod tests;
