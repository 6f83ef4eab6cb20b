//! Proxy endpoints for the external book services
//!
//! Thin passthroughs: the detail lookup returns the upstream body verbatim,
//! and the download-link lookup reshapes a bare array into `{links: [...]}`.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::search::SearchProvider;
use crate::state::AppState;
use crate::storage::ObjectStorage;
use crate::store::{BookStore, UserStore};

#[derive(Deserialize)]
pub struct BookDetailRequest {
    pub book_ids: Option<Vec<String>>,
    pub address: Option<String>,
}

/// POST /api/book-detail
pub async fn book_detail<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Json(req): Json<BookDetailRequest>,
) -> Result<Json<Value>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let book_ids = match req.book_ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => return Err(ApiError::ValidationError("book_ids is required".to_string())),
    };

    let body = state
        .search
        .fetch_detail(&book_ids, req.address.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(body))
}

#[derive(Deserialize)]
pub struct DownloadLinksQuery {
    pub md5: String,
}

#[derive(Serialize)]
pub struct DownloadLinksResponse {
    pub links: Vec<String>,
}

/// GET /api/download?md5=
pub async fn download_links<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Query(query): Query<DownloadLinksQuery>,
) -> Result<Json<DownloadLinksResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let links = state.search.fetch_download_links(&query.md5).await?;

    Ok(Json(DownloadLinksResponse { links }))
}
