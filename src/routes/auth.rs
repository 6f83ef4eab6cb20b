//! Login endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::search::SearchProvider;
use crate::state::AppState;
use crate::storage::ObjectStorage;
use crate::store::{BookStore, UserStore};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub id: String,
    pub username: String,
    pub role: String,
}

/// POST /api/login
pub async fn login<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let user = state
        .users
        .find_by_username(&req.username)?
        .ok_or(ApiError::UserNotFound)?;

    // Passwords are stored and compared verbatim
    if user.password != req.password {
        return Err(ApiError::InvalidCredentials);
    }

    Ok(Json(LoginResponse {
        id: user.id,
        username: user.username,
        role: user.role,
    }))
}
