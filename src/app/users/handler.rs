//! 用户处理器

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::{
    model::{User, UserFields},
    service::UserStore,
};
use crate::core::{error::ApiError, extract::JsonObject};

#[derive(Clone, Default)]
pub struct AppState {
    pub user_store: Arc<UserStore>,
}

impl AppState {
    pub fn new(user_store: UserStore) -> Self {
        Self {
            user_store: Arc::new(user_store),
        }
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.user_store.create(UserFields::from_object(body))?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.user_store.list())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.user_store.get(&id)?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Json<User>, ApiError> {
    let user = state
        .user_store
        .update(&id, UserFields::from_object(body))?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.user_store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
