//! # 用户注册服务
//!
//! 一个基于 Axum 的小型 JSON CRUD 服务，用户记录只保存在进程内存中。
//!
//! - `app`：路由、用户模型、`UserStore` 和处理器
//! - `core`：错误渲染、请求体提取、请求日志中间件
//! - `infrastructure`：TOML 配置和 tracing 初始化

pub mod app;
pub mod core;
pub mod infrastructure;

use std::time::Duration;

use axum::{middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use app::users::{
    handler::AppState,
    model::{Operation, User, UserFields},
    service::{StoreError, UserStore},
};
pub use crate::core::error::ApiError;
pub use infrastructure::config::{Config, ConfigError, HttpConfig, LoggingConfig};

/// 构建完整的应用：路由加上中间件层
pub fn build_app(state: AppState, http: &HttpConfig) -> Router {
    app::router(state)
        .layer(middleware::from_fn(crate::core::middleware::request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
}
