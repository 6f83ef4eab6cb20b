//! User CRUD endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use super::MessageResponse;
use crate::error::ApiError;
use crate::search::SearchProvider;
use crate::state::AppState;
use crate::storage::ObjectStorage;
use crate::store::{BookStore, NewUser, User, UserStore};

/// GET /api/users
pub async fn list_users<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
) -> Result<Json<Vec<User>>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    Ok(Json(state.users.list()?))
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
}

/// POST /api/users
pub async fn create_user<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    // Uniqueness is enforced here, at creation time only
    if state.users.find_by_username(&req.username)?.is_some() {
        return Err(ApiError::UsernameTaken);
    }

    state.users.create(NewUser {
        username: req.username,
        password: req.password,
        email: req.email,
        role: req.role,
    })?;

    Ok(Json(MessageResponse::new("User created successfully")))
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

/// PUT /api/users/:id
pub async fn update_user<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    let mut user = state.users.get(&id)?.ok_or(ApiError::UserNotFound)?;

    if let Some(username) = req.username {
        user.username = username;
    }
    if let Some(email) = req.email {
        user.email = email;
    }
    if let Some(role) = req.role {
        user.role = role;
    }
    // The password is only replaced by a non-empty value
    if let Some(password) = req.password {
        if !password.is_empty() {
            user.password = password;
        }
    }

    state.users.update(&user)?;

    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// DELETE /api/users/:id
pub async fn delete_user<U, B, O, P>(
    State(state): State<Arc<AppState<U, B, O, P>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    if !state.users.delete(&id)? {
        return Err(ApiError::UserNotFound);
    }

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
