//! CLI runner - executes commands

use super::view::PageView;
use crate::catalog::{DetailKind, ListKind};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::error::{Result, ResultExt};
use crate::feed::page_stream;
use crate::fetcher::{CatalogClient, PageSource};
use futures::StreamExt;
use serde::Serialize;
use serde_json::json;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parsed command line
    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Resolve settings: file and environment, then command-line flags
    pub fn settings(&self) -> Result<Settings> {
        let settings = Settings::load(self.cli.config.as_deref())?;
        Ok(settings.with_overrides(self.cli.base_url.clone(), self.cli.token.clone()))
    }

    /// Run the CLI command
    pub async fn run(&self, settings: Settings) -> Result<()> {
        match &self.cli.command {
            Commands::Kinds => self.kinds(&settings),
            Commands::Page {
                kind,
                parent,
                offset,
                limit,
            } => {
                let catalog = settings.catalog()?;
                let limit = limit.unwrap_or_else(|| settings.page_size(*kind));
                self.page(&catalog, *kind, parent, *offset, limit).await
            }
            Commands::Crawl {
                kind,
                parent,
                limit,
                max_pages,
            } => {
                let catalog = settings.catalog()?;
                let limit = limit.unwrap_or_else(|| settings.page_size(*kind));
                self.crawl(&catalog, *kind, parent, limit, *max_pages).await
            }
            Commands::Show { kind, id } => {
                let catalog = settings.catalog()?;
                self.show(&catalog, *kind, id).await
            }
            Commands::Serve { port } => crate::cli::serve(settings, *port).await,
        }
    }

    /// Print known kinds
    fn kinds(&self, settings: &Settings) -> Result<()> {
        for kind in ListKind::ALL {
            let endpoint = kind.endpoint("{parent}")?;
            self.output(&json!({
                "type": "list",
                "name": kind.name(),
                "path": endpoint.path(),
                "params": [endpoint.paginator.limit_param, endpoint.paginator.offset_param],
                "page_size": settings.page_size(kind),
                "stop_condition": endpoint.paginator.stop_condition,
            }))?;
        }
        for kind in DetailKind::ALL {
            let endpoint = kind.endpoint("{id}")?;
            self.output(&json!({
                "type": "detail",
                "name": kind.name(),
                "path": endpoint.segments.join("/"),
            }))?;
        }
        Ok(())
    }

    /// Fetch one page, reporting failures
    async fn page(
        &self,
        catalog: &CatalogClient,
        kind: ListKind,
        parent: &str,
        offset: u64,
        limit: u32,
    ) -> Result<()> {
        let fetcher = catalog.list(kind).with_page_size(limit);
        let page = fetcher.try_fetch_page(parent, limit, offset).await?;
        self.output(&PageView::new(kind, parent, page, fetcher.stop_condition()))
    }

    /// Walk a list and print every item
    async fn crawl(
        &self,
        catalog: &CatalogClient,
        kind: ListKind,
        parent: &str,
        limit: u32,
        max_pages: usize,
    ) -> Result<()> {
        let start = Instant::now();
        let fetcher = catalog.list(kind).with_page_size(limit);
        let mut pages = page_stream(&fetcher, parent, max_pages);

        let mut page_count = 0;
        let mut item_count = 0;
        while let Some(page) = pages.next().await {
            let page = page?;
            page_count += 1;
            item_count += page.len();
            for item in &page.items {
                self.output(item)?;
            }
        }

        info!(
            kind = %kind,
            parent,
            pages = page_count,
            items = item_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "crawl complete"
        );
        Ok(())
    }

    /// Fetch and print one record
    async fn show(&self, catalog: &CatalogClient, kind: DetailKind, id: &str) -> Result<()> {
        let record = catalog.detail_json(kind, id).await?;
        self.output(&record)
    }

    /// Output a document
    fn output<T: Serialize + ?Sized>(&self, msg: &T) -> Result<()> {
        println!("{}", render(msg, self.cli.format)?);
        Ok(())
    }
}

/// Serialize a document in the requested format
fn render<T: Serialize + ?Sized>(msg: &T, format: OutputFormat) -> Result<String> {
    let encoded = match format {
        OutputFormat::Json => serde_json::to_string(msg),
        OutputFormat::Pretty => serde_json::to_string_pretty(msg),
    };
    encoded.context("Failed to encode output")
}
