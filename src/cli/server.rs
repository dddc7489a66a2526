//! HTTP server mode exposing feeds and details as JSON

use anyhow::Context as _;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::view::PageView;
use crate::catalog::{DetailKind, ListKind};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fetcher::{CatalogClient, PageSource};

/// Server state
struct AppState {
    catalog: CatalogClient,
    settings: Settings,
}

/// Query parameters for feed pages
#[derive(Debug, Deserialize)]
struct FeedQuery {
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    offset: Option<u64>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(msg))).into_response()
}

/// Status code reported for a failed detail lookup
fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::NotFound { .. } | Error::UnknownKind { .. } => StatusCode::NOT_FOUND,
        Error::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Build the router
pub fn router(catalog: CatalogClient, settings: Settings) -> Router {
    let state = AppState { catalog, settings };

    Router::new()
        .route("/health", get(health))
        .route("/kinds", get(kinds))
        .route("/feeds/:kind/:parent_id", get(feed_page))
        .route("/details/:kind/:id", get(detail))
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(settings: Settings, port: u16) -> Result<()> {
    let catalog = settings.catalog()?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(catalog, settings).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to port {port}"))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Known kinds with their effective page sizes
async fn kinds(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let lists: Vec<Value> = ListKind::ALL
        .into_iter()
        .map(|kind| {
            json!({
                "name": kind.name(),
                "page_size": state.settings.page_size(kind),
                "stop_condition": kind.stop_condition(),
            })
        })
        .collect();
    let details: Vec<&str> = DetailKind::ALL.into_iter().map(DetailKind::name).collect();

    Json(ApiResponse::success(json!({
        "lists": lists,
        "details": details,
    })))
}

/// One page of a list; backend failures come back as an exhausted empty page
async fn feed_page(
    State(state): State<Arc<AppState>>,
    Path((kind, parent_id)): Path<(String, String)>,
    Query(query): Query<FeedQuery>,
) -> Response {
    let kind = match kind.parse::<ListKind>() {
        Ok(kind) => kind,
        Err(e) => return error_response(StatusCode::NOT_FOUND, e.to_string()),
    };

    let limit = query.limit.unwrap_or_else(|| state.settings.page_size(kind));
    if limit == 0 {
        return error_response(StatusCode::BAD_REQUEST, "limit must be greater than zero");
    }
    let offset = query.offset.unwrap_or(0);

    let fetcher = state.catalog.list(kind).with_page_size(limit);
    let page = fetcher.fetch_page(&parent_id, limit, offset).await;
    let view = PageView::new(kind, parent_id, page, fetcher.stop_condition());

    (StatusCode::OK, Json(ApiResponse::success(view))).into_response()
}

/// A single record
async fn detail(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    let result = match kind.parse::<DetailKind>() {
        Ok(kind) => state.catalog.detail_json(kind, &id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::success(record))).into_response(),
        Err(e) => {
            let status = status_for(&e);
            if status == StatusCode::BAD_GATEWAY {
                tracing::warn!(error = %e, "detail lookup failed");
            }
            error_response(status, e.to_string())
        }
    }
}
