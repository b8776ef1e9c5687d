//! 页面端点
//!
//! 表单提交后重定向回首页（POST/Redirect/GET），加载中页面自动刷新。

use askama::Template;
use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use std::sync::Arc;
use tracing::info;

use crate::error::AppResult;
use crate::models::{OptimizationGoal, SubmitForm};
use crate::state::AppState;
use crate::ui::IndexPage;

/// 渲染首页
async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let page = state.session.with_controller(IndexPage::from_controller);
    Ok(Html(page.render()?))
}

/// 提交想法
async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmitForm>,
) -> AppResult<Redirect> {
    let goal = match form.goal.as_deref() {
        Some(goal) => goal.parse::<OptimizationGoal>()?,
        None => OptimizationGoal::default(),
    };

    state.session.update_idea_text(form.idea);
    state.session.update_goal(goal);

    if state.session.submit().is_some() {
        info!("Submitted idea from page: goal={}", goal);
    }
    Ok(Redirect::to("/"))
}

/// 重新开始
async fn reset(State(state): State<Arc<AppState>>) -> Redirect {
    state.session.reset();
    Redirect::to("/")
}

/// 创建页面路由
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
        .route("/reset", post(reset))
}
