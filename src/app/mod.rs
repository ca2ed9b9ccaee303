//! 应用层

pub mod users;

use axum::{
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::core::error::ApiError;
use users::handler::{self, AppState};

/// 路由表
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(handler::list_users).post(handler::create_user))
        .route(
            "/users/:id",
            get(handler::get_user)
                .put(handler::update_user)
                .delete(handler::delete_user),
        )
        .fallback(not_found)
        .with_state(state)
}

/// 健康检查
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
