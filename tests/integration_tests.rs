//! Integration tests using mock HTTP server
//!
//! Tests the full flow: settings → catalog client → HTTP pages → feeds

use futures::StreamExt;
use melian_feed::catalog::ProductSummary;
use melian_feed::{
    page_stream, Completion, Error, FeedState, ListFeed, ListKind, PageSource, Settings,
};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// ============================================================================
// Paginated backend
// ============================================================================

/// Serves `size` products, slicing by the request's limit/offset params
struct CatalogBackend {
    size: usize,
    items_key: &'static str,
    limit_param: &'static str,
    offset_param: &'static str,
    report_total: bool,
    fail_offset: Option<usize>,
    calls: Arc<AtomicUsize>,
}

impl CatalogBackend {
    fn store_products(size: usize) -> Self {
        Self {
            size,
            items_key: "data",
            limit_param: "size",
            offset_param: "from",
            report_total: false,
            fail_offset: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn collection_products(size: usize) -> Self {
        Self {
            items_key: "products",
            limit_param: "limit",
            offset_param: "offset",
            ..Self::store_products(size)
        }
    }

    fn with_total(mut self) -> Self {
        self.report_total = true;
        self
    }

    fn failing_at(mut self, offset: usize) -> Self {
        self.fail_offset = Some(offset);
        self
    }

    fn param(request: &Request, name: &str) -> Option<usize> {
        request
            .url
            .query_pairs()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.parse().ok())
    }
}

impl Respond for CatalogBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let limit = Self::param(request, self.limit_param).unwrap_or(10);
        let offset = Self::param(request, self.offset_param).unwrap_or(0);
        if self.fail_offset == Some(offset) {
            return ResponseTemplate::new(500).set_body_string("internal error");
        }

        let start = offset.min(self.size);
        let end = (offset + limit).min(self.size);
        let items: Vec<Value> = (start..end)
            .map(|i| json!({"product_id": format!("p{i}"), "name": format!("Product {i}")}))
            .collect();

        let mut body = Map::new();
        body.insert(self.items_key.to_string(), Value::Array(items));
        if self.report_total {
            body.insert("total".to_string(), json!(self.size));
        }
        ResponseTemplate::new(200).set_body_json(Value::Object(body))
    }
}

fn settings(base_url: &str) -> Settings {
    let mut settings = Settings::default().with_overrides(Some(base_url.to_string()), None);
    settings.api.max_retries = 0;
    settings.api.requests_per_second = 0;
    settings
}

async fn mount(server: &MockServer, route: &str, backend: CatalogBackend) -> Arc<AtomicUsize> {
    let calls = Arc::clone(&backend.calls);
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(backend)
        .mount(server)
        .await;
    calls
}

// ============================================================================
// Feed walks
// ============================================================================

#[tokio::test]
async fn test_fifty_items_in_pages_of_24() {
    let server = MockServer::start().await;
    let calls = mount(&server, "/products/ready", CatalogBackend::store_products(50)).await;

    let catalog = settings(&server.uri()).catalog().unwrap();
    let products = catalog.store_products();
    let mut feed = ListFeed::for_source("store-1", &products);

    let fetches = feed.drain(&products, 100).await.unwrap();
    assert_eq!(fetches, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(feed.state(), FeedState::Exhausted);

    let ids: Vec<String> = feed.into_items().into_iter().map(|p| p.product_id).collect();
    assert_eq!(ids.len(), 50);
    assert_eq!(ids.first().map(String::as_str), Some("p0"));
    assert_eq!(ids.last().map(String::as_str), Some("p49"));
}

#[tokio::test]
async fn test_exact_multiple_with_total_stops_early() {
    let server = MockServer::start().await;
    let calls = mount(
        &server,
        "/collections/c1/products",
        CatalogBackend::collection_products(48).with_total(),
    )
    .await;

    let catalog = settings(&server.uri()).catalog().unwrap();
    let products = catalog.collection_products();
    let mut feed = ListFeed::for_source("c1", &products);

    feed.drain(&products, 100).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(feed.pages().fetched(), 48);
}

#[tokio::test]
async fn test_exact_multiple_without_total_costs_one_extra_fetch() {
    let server = MockServer::start().await;
    let calls = mount(
        &server,
        "/collections/c1/products",
        CatalogBackend::collection_products(48),
    )
    .await;

    let catalog = settings(&server.uri()).catalog().unwrap();
    let products = catalog.collection_products();
    let mut feed = ListFeed::for_source("c1", &products);

    feed.drain(&products, 100).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(feed.pages().fetched(), 48);
    assert!(feed.pages().last().unwrap().is_empty());
}

#[tokio::test]
async fn test_page_size_override_from_settings() {
    let server = MockServer::start().await;
    let calls = mount(&server, "/products/ready", CatalogBackend::store_products(10)).await;

    let mut settings = settings(&server.uri());
    settings.page_sizes.insert(ListKind::StoreProducts, 4);
    let catalog = settings.catalog().unwrap();
    let products = catalog
        .store_products()
        .with_page_size(settings.page_size(ListKind::StoreProducts));

    let pages: Vec<_> = page_stream(&products, "s1", 100).collect().await;
    assert_eq!(pages.len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(pages[2].as_ref().unwrap().len(), 2);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_mid_list_failure_is_empty_page_for_fail_soft_callers() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/products/ready",
        CatalogBackend::store_products(100).failing_at(24),
    )
    .await;

    let catalog = settings(&server.uri()).catalog().unwrap();
    let products = catalog.store_products();

    let page = products.fetch_page("s1", 24, 24).await;
    assert!(page.is_empty());
    assert_eq!(page.offset, 24);

    let err = products.try_fetch_page("s1", 24, 24).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_feed_failure_is_distinct_from_exhaustion() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/products/ready",
        CatalogBackend::store_products(100).failing_at(24),
    )
    .await;

    let catalog = settings(&server.uri()).catalog().unwrap();
    let products = catalog.store_products();
    let mut feed = ListFeed::for_source("s1", &products);

    assert!(feed.drain(&products, 100).await.is_err());
    assert_eq!(feed.state(), FeedState::Failed);
    assert!(feed.has_next_page());
    assert_eq!(feed.pages().fetched(), 24);
}

#[tokio::test]
async fn test_stale_completion_after_parent_change() {
    let server = MockServer::start().await;
    mount(&server, "/products/ready", CatalogBackend::store_products(5)).await;

    let catalog = settings(&server.uri()).catalog().unwrap();
    let products = catalog.store_products();
    let mut feed: ListFeed<ProductSummary> = ListFeed::for_source("store-a", &products);

    let request = feed.begin_load().unwrap();
    let result = products
        .try_fetch_page(&request.parent_id, request.limit, request.offset)
        .await;

    feed.reset("store-b");
    assert!(matches!(feed.complete(&request, result), Completion::Stale));
    assert_eq!(feed.state(), FeedState::Idle);
    assert!(feed.pages().is_empty());
}

// ============================================================================
// Envelopes and auth
// ============================================================================

#[tokio::test]
async fn test_related_products_root_array_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/products/related/[^/]+$"))
        .and(header("Authorization", "Bearer site-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "r1", "name": "One"},
            {"id": "r2", "name": "Two"}
        ])))
        .mount(&server)
        .await;

    let catalog = settings(&server.uri())
        .with_overrides(None, Some("site-token".into()))
        .catalog()
        .unwrap();
    let related = catalog.related_products();
    let mut feed = ListFeed::for_source("p1", &related);

    feed.drain(&related, 10).await.unwrap();
    assert_eq!(feed.state(), FeedState::Exhausted);
    let ids: Vec<&str> = feed.items().map(|p| p.product_id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
}

#[tokio::test]
async fn test_user_collections_string_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/user/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": [{"id": "c1", "name": "Summer", "previewImages": []}],
            "count": "1"
        })))
        .mount(&server)
        .await;

    let catalog = settings(&server.uri()).catalog().unwrap();
    let page = catalog.user_collections().fetch_page("u1", 21, 0).await;
    assert_eq!(page.total, Some(1));
    assert_eq!(page.items[0].name, "Summer");
}
