//! API 路由模块

mod config;
mod health;
mod page;
mod recommend;

pub use config::config_routes;
pub use health::health_routes;
pub use page::page_routes;
pub use recommend::recommend_routes;

use axum::Router;

use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

/// 未匹配的路由
async fn not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}

/// 创建所有 API 路由
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(config_routes())
        .merge(page_routes())
        .merge(recommend_routes())
        .fallback(not_found)
        .with_state(state)
}
