//! 推荐结果数据模型
//!
//! 与补全服务约定的 JSON 结构保持一致（字段名使用 camelCase）。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 优化目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OptimizationGoal {
    #[default]
    #[serde(rename = "Fastest to ship")]
    FastestToShip,
    #[serde(rename = "Cheapest")]
    Cheapest,
    #[serde(rename = "Most scalable")]
    MostScalable,
    #[serde(rename = "Beginner-friendly")]
    BeginnerFriendly,
}

impl OptimizationGoal {
    /// 所有可选目标（按界面下拉框顺序）
    pub const ALL: [OptimizationGoal; 4] = [
        OptimizationGoal::FastestToShip,
        OptimizationGoal::Cheapest,
        OptimizationGoal::MostScalable,
        OptimizationGoal::BeginnerFriendly,
    ];

    /// 显示文本，同时也是发给模型的原文
    pub fn label(&self) -> &'static str {
        match self {
            OptimizationGoal::FastestToShip => "Fastest to ship",
            OptimizationGoal::Cheapest => "Cheapest",
            OptimizationGoal::MostScalable => "Most scalable",
            OptimizationGoal::BeginnerFriendly => "Beginner-friendly",
        }
    }
}

impl fmt::Display for OptimizationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 未知优化目标
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown optimization goal: {0}")]
pub struct UnknownGoal(pub String);

impl FromStr for OptimizationGoal {
    type Err = UnknownGoal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptimizationGoal::ALL
            .into_iter()
            .find(|goal| goal.label() == s.trim())
            .ok_or_else(|| UnknownGoal(s.to_string()))
    }
}

/// 推荐请求（每次提交新建，调用结束即丢弃）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub idea_description: String,
    #[serde(default)]
    pub optimization_goal: OptimizationGoal,
}

/// 推荐技术栈中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    /// 仅用于选择图标的建议性分类
    pub category: String,
    pub description: String,
}

/// 不推荐使用的工具
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvoidEntry {
    pub tool: String,
    pub reason: String,
}

/// MVP 取舍线
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpCutLine {
    pub must_build: Vec<String>,
    pub must_cut: Vec<String>,
}

/// 补全服务返回的推荐结果
///
/// 所有字段都是必需的，缺失字段视为契约违反而不是空状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub classification: String,
    pub build_approach: String,
    pub stack: Vec<ToolEntry>,
    pub what_not_to_use: Vec<AvoidEntry>,
    pub mvp_cut_line: MvpCutLine,
    pub common_mistake: String,
    pub why_this_stack_wins: Vec<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// 测试用的完整响应文档
    pub fn sample_json() -> &'static str {
        r#"{
            "classification": "Real-time whiteboard for remote product teams",
            "buildApproach": "Code",
            "stack": [
                {"name": "Next.js", "category": "Frontend", "description": "Fast iteration with one deploy target."},
                {"name": "Supabase", "category": "Database", "description": "Postgres plus realtime out of the box."},
                {"name": "Vercel", "category": "Hosting", "description": "Zero-config deploys."}
            ],
            "whatNotToUse": [
                {"tool": "Kubernetes", "reason": "Operational overhead with no users yet."}
            ],
            "mvpCutLine": {
                "mustBuild": ["Shared canvas", "Invite links"],
                "mustCut": ["Version history", "SSO"]
            },
            "commonMistake": "Building a custom CRDT before validating demand.",
            "whyThisStackWins": ["One language end to end", "Realtime is built in"]
        }"#
    }

    pub fn sample() -> RecommendationResponse {
        serde_json::from_str(sample_json()).expect("fixture parses")
    }
}
