//! CLI module
//!
//! Command-line interface over the catalog feeds.
//!
//! # Commands
//!
//! - `kinds` - List known list and detail kinds
//! - `page` - Fetch one page of a list
//! - `crawl` - Walk a whole list, one item per line
//! - `show` - Fetch a single record
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;
mod view;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve};
pub use view::PageView;
