//! REST API 请求/响应模型

use serde::{Deserialize, Serialize};

use super::recommendation::{OptimizationGoal, RecommendationResponse};

/// 页面表单提交
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub idea: String,
    #[serde(default)]
    pub goal: Option<String>,
}

/// 优化目标列表响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsResponse {
    pub goals: Vec<&'static str>,
    pub default_goal: &'static str,
}

impl GoalsResponse {
    pub fn new() -> Self {
        Self {
            goals: OptimizationGoal::ALL.iter().map(|g| g.label()).collect(),
            default_goal: OptimizationGoal::default().label(),
        }
    }
}

impl Default for GoalsResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// 控制器阶段快照
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseSnapshot {
    Idle,
    Loading,
    Success { result: RecommendationResponse },
    Failed { message: String },
}

/// 控制器状态快照
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub idea_text: String,
    pub optimization_goal: OptimizationGoal,
    pub can_submit: bool,
    pub phase: PhaseSnapshot,
}
