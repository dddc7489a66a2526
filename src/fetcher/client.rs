//! HTTP-backed list and detail fetchers

use super::source::PageSource;
use crate::catalog::{
    CollectionDetail, CollectionSummary, DetailKind, ExternalProfile, ListKind, Outfit,
    ProductSummary, ProductWithRelated, StoreSummary,
};
use crate::decode::{decode_detail, decode_page};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{Page, StopCondition};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// List fetcher
// ============================================================================

/// Fetches pages of one list kind, decoding items as `T`
pub struct ListingFetcher<T> {
    client: Arc<HttpClient>,
    kind: ListKind,
    page_size: u32,
    _item: PhantomData<fn() -> T>,
}

impl<T> ListingFetcher<T> {
    /// Create a fetcher using the kind's default page size
    pub fn new(client: Arc<HttpClient>, kind: ListKind) -> Self {
        Self {
            client,
            kind,
            page_size: kind.default_page_size(),
            _item: PhantomData,
        }
    }

    /// Override the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// The list kind
    pub fn kind(&self) -> ListKind {
        self.kind
    }
}

impl<T> Clone for ListingFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            kind: self.kind,
            page_size: self.page_size,
            _item: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for ListingFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingFetcher")
            .field("kind", &self.kind)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T> PageSource<T> for ListingFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn try_fetch_page(&self, parent_id: &str, limit: u32, offset: u64) -> Result<Page<T>> {
        if limit == 0 {
            return Err(Error::invalid_request("page limit must be greater than zero"));
        }

        let endpoint = self.kind.endpoint(parent_id)?;
        let url = self.client.segments_url(&endpoint.segments)?;
        let request = RequestConfig {
            query: endpoint.page_query(limit, offset),
            ..RequestConfig::default()
        };

        let body: Value = self.client.get_json_with_config(&url, request).await?;
        let page = decode_page(&body, &endpoint.envelope, limit, offset)?;

        debug!(
            kind = %self.kind,
            parent_id = %endpoint.parent_id,
            offset,
            limit,
            items = page.len(),
            total = ?page.total,
            "fetched page"
        );
        Ok(page)
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn stop_condition(&self) -> StopCondition {
        self.kind.stop_condition()
    }
}

// ============================================================================
// Detail fetcher
// ============================================================================

/// Fetches single records
#[derive(Debug, Clone)]
pub struct DetailFetcher {
    client: Arc<HttpClient>,
}

impl DetailFetcher {
    /// Create a detail fetcher
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Fetch and decode one record
    pub async fn fetch<T: DeserializeOwned>(&self, kind: DetailKind, id: &str) -> Result<T> {
        let endpoint = kind.endpoint(id)?;
        let url = self.client.segments_url(&endpoint.segments)?;
        let request = RequestConfig {
            query: endpoint.query.clone(),
            ..RequestConfig::default()
        };

        let body: Value = self.client.get_json_with_config(&url, request).await?;
        debug!(kind = %kind, id, "fetched detail");
        decode_detail(&body, endpoint.field)
    }

    /// Fetch one record, logging and dropping any failure
    pub async fn fetch_opt<T: DeserializeOwned>(&self, kind: DetailKind, id: &str) -> Option<T> {
        match self.fetch(kind, id).await {
            Ok(record) => Some(record),
            Err(Error::NotFound { .. }) => None,
            Err(e) => {
                warn!(kind = %kind, id, error = %e, "detail fetch failed");
                None
            }
        }
    }
}

// ============================================================================
// Catalog facade
// ============================================================================

/// Typed entry point for every list and detail the site renders
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Arc<HttpClient>,
}

impl CatalogClient {
    /// Wrap an HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Shared HTTP client
    pub fn http(&self) -> Arc<HttpClient> {
        Arc::clone(&self.client)
    }

    /// Fetcher for any list kind with untyped items
    pub fn list(&self, kind: ListKind) -> ListingFetcher<Value> {
        ListingFetcher::new(self.http(), kind)
    }

    /// Products sold by a store
    pub fn store_products(&self) -> ListingFetcher<ProductSummary> {
        ListingFetcher::new(self.http(), ListKind::StoreProducts)
    }

    /// Products in a collection
    pub fn collection_products(&self) -> ListingFetcher<ProductSummary> {
        ListingFetcher::new(self.http(), ListKind::CollectionProducts)
    }

    /// Stores in a collection
    pub fn collection_stores(&self) -> ListingFetcher<StoreSummary> {
        ListingFetcher::new(self.http(), ListKind::CollectionStores)
    }

    /// Collections owned by a user
    pub fn user_collections(&self) -> ListingFetcher<CollectionSummary> {
        ListingFetcher::new(self.http(), ListKind::UserCollections)
    }

    /// Products related to a product
    pub fn related_products(&self) -> ListingFetcher<ProductSummary> {
        ListingFetcher::new(self.http(), ListKind::RelatedProducts)
    }

    /// Detail fetcher
    pub fn details(&self) -> DetailFetcher {
        DetailFetcher::new(self.http())
    }

    /// Store record
    pub async fn store(&self, id: &str) -> Result<StoreSummary> {
        self.details().fetch(DetailKind::Store, id).await
    }

    /// Product record with its first page of related products
    pub async fn product(&self, id: &str) -> Result<ProductWithRelated> {
        self.details().fetch(DetailKind::Product, id).await
    }

    /// Collection header
    pub async fn collection(&self, id: &str) -> Result<CollectionDetail> {
        self.details().fetch(DetailKind::Collection, id).await
    }

    /// Outfit post
    pub async fn outfit(&self, id: &str) -> Result<Outfit> {
        self.details().fetch(DetailKind::Outfit, id).await
    }

    /// External user profile
    pub async fn external_profile(&self, id: &str) -> Result<ExternalProfile> {
        self.details().fetch(DetailKind::ExternalProfile, id).await
    }

    /// Fetch a record through its typed model and return it as JSON
    pub async fn detail_json(&self, kind: DetailKind, id: &str) -> Result<Value> {
        let record = match kind {
            DetailKind::Store => serde_json::to_value(self.store(id).await?)?,
            DetailKind::Product => serde_json::to_value(self.product(id).await?)?,
            DetailKind::Collection => serde_json::to_value(self.collection(id).await?)?,
            DetailKind::Outfit => serde_json::to_value(self.outfit(id).await?)?,
            DetailKind::ExternalProfile => {
                serde_json::to_value(self.external_profile(id).await?)?
            }
        };
        Ok(record)
    }
}
