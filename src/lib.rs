// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # melian-feed
//!
//! Paginated catalog feeds for the Melian marketing site.
//!
//! Every list the site renders (store products, collection products and
//! stores, a user's collections, related products) is fetched in fixed-size
//! offset pages. A failed fetch degrades to an empty page, so a list view
//! simply stops; callers that need to tell failures apart use
//! [`PageSource::try_fetch_page`] and [`ListFeed`] instead.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use melian_feed::{ListFeed, PageSource, Settings};
//!
//! #[tokio::main]
//! async fn main() -> melian_feed::Result<()> {
//!     let settings = Settings::load(None)?;
//!     let catalog = settings.catalog()?;
//!
//!     let products = catalog.store_products();
//!     let mut feed = ListFeed::for_source("store-42", &products);
//!     feed.drain(&products, 50).await?;
//!
//!     for product in feed.items() {
//!         println!("{}", product.product_id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │   CLI (page / crawl / show / kinds)      axum server (serve)    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │  ListFeed state machine · page_stream · CatalogClient           │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Decode   │  Catalog    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Bearer   │ GET       │ Offset/limit  │ Envelope  │ List kinds  │
//! │ Public   │ Retry     │ Short page    │ aliases   │ Detail kinds│
//! │ token    │ Rate Limit│ Total count   │ Totals    │ Models      │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bearer token authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Offset pagination and termination rules
pub mod pagination;

/// Response envelope decoding
pub mod decode;

/// List and detail kinds, endpoints and models
pub mod catalog;

/// Page sources over HTTP
pub mod fetcher;

/// List feed state machine
pub mod feed;

/// Runtime settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::{DetailKind, ListKind};
pub use config::Settings;
pub use feed::{page_stream, Completion, FeedState, ListFeed, PageRequest};
pub use fetcher::{CatalogClient, DetailFetcher, ListingFetcher, PageSource};
pub use pagination::{has_next_page, next_page_offset, Page, PageSequence, StopCondition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
