//! Fetcher module
//!
//! Turns list and detail kinds into backend requests.
//!
//! # Overview
//!
//! - [`PageSource`] is the caller-facing contract for one list kind:
//!   `try_fetch_page` reports failures, `fetch_page` folds them into an empty
//!   page so callers can treat a dead backend like an exhausted list.
//! - [`ListingFetcher`] implements it over HTTP.
//! - [`DetailFetcher`] loads single records.
//! - [`CatalogClient`] bundles both behind one shared [`HttpClient`](crate::http::HttpClient).

mod client;
mod source;

pub use client::{CatalogClient, DetailFetcher, ListingFetcher};
pub use source::PageSource;
