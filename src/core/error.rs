//! 核心错误处理模块
//!
//! 所有错误在这里统一转换成 HTTP 状态码和 `{"error": ...}` 响应体。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::app::users::{model::Operation, service::StoreError};

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request body is not a JSON object")]
    MalformedBody,
    #[error("route not found")]
    RouteNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody
            | ApiError::Store(StoreError::NameRequired)
            | ApiError::Store(StoreError::InvalidNameValue)
            | ApiError::Store(StoreError::InvalidAgeValue(_)) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound | ApiError::Store(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
        }
    }

    /// 返回给调用方的错误文案
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MalformedBody => "JSON required",
            ApiError::Store(StoreError::NameRequired) => "name is required",
            ApiError::Store(StoreError::InvalidNameValue) => "invalid name",
            ApiError::Store(StoreError::InvalidAgeValue(Operation::Create)) => {
                "age must be a non-negative integer"
            }
            ApiError::Store(StoreError::InvalidAgeValue(Operation::Update)) => "invalid age",
            ApiError::RouteNotFound | ApiError::Store(StoreError::NotFound(_)) => "not found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self, "request rejected");

        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_age_message_depends_on_operation() {
        let (status, body) =
            render(StoreError::InvalidAgeValue(Operation::Create).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "age must be a non-negative integer"}));

        let (status, body) =
            render(StoreError::InvalidAgeValue(Operation::Update).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "invalid age"}));
    }

    #[tokio::test]
    async fn test_not_found_hides_id() {
        let (status, body) = render(StoreError::NotFound("secret-id".to_string()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "not found"}));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::MalformedBody.message(), "JSON required");
        assert_eq!(ApiError::from(StoreError::NameRequired).message(), "name is required");
        assert_eq!(ApiError::from(StoreError::InvalidNameValue).message(), "invalid name");
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
    }
}
