//! CLI commands and argument parsing

use crate::catalog::{DetailKind, ListKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Melian catalog feed CLI
#[derive(Parser, Debug)]
#[command(name = "melian-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true, env = "MELIAN_API_URL")]
    pub base_url: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "MELIAN_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the known list and detail kinds
    Kinds,

    /// Fetch one page of a list
    Page {
        /// List kind (e.g. store-products)
        kind: ListKind,

        /// Parent entity id
        parent: String,

        /// Starting position
        #[arg(long, default_value = "0")]
        offset: u64,

        /// Page size (defaults to the list's page size)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Walk a whole list, printing one item per line
    Crawl {
        /// List kind
        kind: ListKind,

        /// Parent entity id
        parent: String,

        /// Page size (defaults to the list's page size)
        #[arg(long)]
        limit: Option<u32>,

        /// Maximum pages to fetch
        #[arg(long, default_value = "100")]
        max_pages: usize,
    },

    /// Fetch a single record
    Show {
        /// Detail kind (e.g. store, outfit)
        kind: DetailKind,

        /// Record id
        id: String,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    Pretty,
}
