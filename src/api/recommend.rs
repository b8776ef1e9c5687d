//! 推荐相关 JSON 端点

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{GoalsResponse, RecommendationRequest, RecommendationResponse, StateResponse};
use crate::state::AppState;
use crate::ui::GENERIC_ERROR_MESSAGE;

/// 一次性推荐（不经过页面会话）
async fn recommend(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(req) = payload?;
    if req.idea_description.trim().is_empty() {
        return Err(AppError::BadRequest("ideaDescription is required".to_string()));
    }

    info!("API recommendation request: goal={}", req.optimization_goal);
    let response = state
        .recommender
        .recommend(&req.idea_description, req.optimization_goal)
        .await
        // 具体原因已由服务层记录
        .map_err(|_| AppError::Llm(GENERIC_ERROR_MESSAGE.to_string()))?;

    Ok(Json(response))
}

/// 当前页面状态
async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(state.session.snapshot())
}

/// 重置页面状态
async fn reset_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    state.session.reset();
    Json(state.session.snapshot())
}

/// 可选的优化目标
async fn list_goals() -> Json<GoalsResponse> {
    Json(GoalsResponse::new())
}

/// 创建推荐路由
pub fn recommend_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recommend", post(recommend))
        .route("/api/state", get(get_state))
        .route("/api/reset", post(reset_state))
        .route("/api/goals", get(list_goals))
}
