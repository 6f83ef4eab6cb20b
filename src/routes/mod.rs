//! HTTP routes for the backend

mod admin;
mod auth;
mod proxy;
mod search;
mod users;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::search::SearchProvider;
use crate::state::AppState;
use crate::storage::ObjectStorage;
use crate::store::{BookStore, UserStore};

/// Upload size ceiling; book files regularly exceed axum's default limit
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Shared `{message}` success body
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router<U, B, O, P>(state: Arc<AppState<U, B, O, P>>) -> Router
where
    U: UserStore + 'static,
    B: BookStore + 'static,
    O: ObjectStorage + 'static,
    P: SearchProvider + 'static,
{
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/:id",
            put(users::update_user).delete(users::delete_user),
        )
        .route("/api/admin/upload", post(admin::upload_book))
        .route("/api/admin/download", get(admin::download_book))
        .route("/api/admin/update", put(admin::update_book))
        .route("/api/admin/delete", delete(admin::delete_book))
        .route("/api/search", get(search::search_books))
        .route("/api/book-detail", post(proxy::book_detail))
        .route("/api/download", get(proxy::download_links))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // The admin/catalog frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
