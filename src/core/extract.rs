//! 请求体提取器

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ApiError;

/// 只接受 JSON 对象的请求体
///
/// Content-Type 不是 JSON、内容无法解析、或者解析结果不是对象（数组、字符串、
/// 数字、null）时一律拒绝为 [`ApiError::MalformedBody`]。字段级校验不在这里做。
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(object))) => Ok(JsonObject(object)),
            Ok(Json(other)) => {
                debug!(kind = json_kind(&other), "request body is not an object");
                Err(ApiError::MalformedBody)
            }
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "request body rejected");
                Err(ApiError::MalformedBody)
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
