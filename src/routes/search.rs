//! Aggregated catalog search endpoint

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::search::{aggregate_search, SearchProvider, SearchResultItem};
use crate::state::AppState;
use crate::storage::ObjectStorage;
use crate::store::{BookStore, UserStore};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub books: Vec<SearchResultItem>,
}

/// GET /api/search?query=
pub async fn search_books<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let books =
        aggregate_search(state.books.as_ref(), state.search.as_ref(), &query.query).await?;

    Ok(Json(SearchResponse { books }))
}
