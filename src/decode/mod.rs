//! Response decoder module
//!
//! # Overview
//!
//! The backend wraps list results in loosely specified envelopes: items sit
//! under `products`, `stores`, `collections` or `data` (or the body is the
//! array itself), and the total count may be `total`, `count`,
//! `productsCount` or `pagination.total`. An [`Envelope`] lists those aliases
//! in priority order, and [`decode_page`] normalizes a body into one
//! canonical [`Page`](crate::pagination::Page).

mod decoders;
mod types;

pub use decoders::{decode_detail, decode_page, extract_path, extract_u64};
pub use types::{Envelope, ROOT_PATH};
