//! 页面视图
//!
//! 把控制器状态映射为模板数据。模板只负责布局，所有取舍在这里完成。

use askama::Template;

use super::controller::{Controller, Phase};
use super::icons::icon_for_category;
use crate::models::{AvoidEntry, OptimizationGoal, RecommendationResponse};

/// 目标下拉框选项
pub struct GoalOption {
    pub label: &'static str,
    pub selected: bool,
}

/// 技术栈卡片
pub struct ToolCard {
    pub name: String,
    pub category: String,
    pub description: String,
    pub icon_glyph: &'static str,
    pub icon_slug: &'static str,
}

/// 成功结果的报告
pub struct ReportView {
    pub build_approach: String,
    pub classification: String,
    pub cards: Vec<ToolCard>,
    pub avoid: Vec<AvoidEntry>,
    pub must_build: Vec<String>,
    pub must_cut: Vec<String>,
    pub common_mistake: String,
    pub reasons: Vec<String>,
}

impl From<&RecommendationResponse> for ReportView {
    fn from(r: &RecommendationResponse) -> Self {
        let cards = r
            .stack
            .iter()
            .map(|tool| {
                let icon = icon_for_category(&tool.category);
                ToolCard {
                    name: tool.name.clone(),
                    category: tool.category.clone(),
                    description: tool.description.clone(),
                    icon_glyph: icon.glyph(),
                    icon_slug: icon.slug(),
                }
            })
            .collect();

        Self {
            build_approach: r.build_approach.clone(),
            classification: r.classification.clone(),
            cards,
            avoid: r.what_not_to_use.clone(),
            must_build: r.mvp_cut_line.must_build.clone(),
            must_cut: r.mvp_cut_line.must_cut.clone(),
            common_mistake: r.common_mistake.clone(),
            reasons: r.why_this_stack_wins.clone(),
        }
    }
}

/// 首页
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub idea_text: String,
    pub goals: Vec<GoalOption>,
    pub loading: bool,
    pub error: Option<String>,
    pub report: Option<ReportView>,
}

impl IndexPage {
    pub fn from_controller(controller: &Controller) -> Self {
        let selected = controller.goal();
        let goals = OptimizationGoal::ALL
            .iter()
            .map(|g| GoalOption {
                label: g.label(),
                selected: *g == selected,
            })
            .collect();

        let (loading, error, report) = match controller.phase() {
            Phase::Idle => (false, None, None),
            Phase::Loading => (true, None, None),
            Phase::Failed(message) => (false, Some(message.clone()), None),
            Phase::Success(result) => (false, None, Some(ReportView::from(result))),
        };

        Self {
            idea_text: controller.idea_text().to_string(),
            goals,
            loading,
            error,
            report,
        }
    }
}
