//! 展示层控制器
//!
//! 持有输入文本、优化目标和一次请求的生命周期。控制器本身是同步的纯状态机，
//! 网络调用由 [`super::session::Session`] 驱动，完成后通过 [`Ticket`] 回填结果。

use tracing::{debug, error, info};

use crate::models::{OptimizationGoal, PhaseSnapshot, RecommendationResponse, StateResponse};
use crate::services::RecommendError;

/// 展示给用户的统一错误信息（具体原因只写日志）
pub const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong while fetching the recommendation. Please try again.";

/// 请求生命周期
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success(RecommendationResponse),
    Failed(String),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }
}

/// 一次已发出请求的凭证
///
/// 只有序号与控制器最新序号一致的凭证才能写回结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub idea: String,
    pub goal: OptimizationGoal,
}

/// 控制器
#[derive(Debug, Clone, Default)]
pub struct Controller {
    idea_text: String,
    goal: OptimizationGoal,
    phase: Phase,
    latest_seq: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn idea_text(&self) -> &str {
        &self.idea_text
    }

    pub fn goal(&self) -> OptimizationGoal {
        self.goal
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// 是否允许提交（界面用于禁用按钮）
    pub fn can_submit(&self) -> bool {
        !self.phase.is_loading() && !self.idea_text.trim().is_empty()
    }

    pub fn update_idea_text(&mut self, text: impl Into<String>) {
        self.idea_text = text.into();
    }

    pub fn update_goal(&mut self, goal: OptimizationGoal) {
        self.goal = goal;
    }

    /// 提交
    ///
    /// 输入为空白或已有请求在途时返回 `None` 且不改变状态；
    /// 否则进入 `Loading` 并签发新的凭证。
    pub fn submit(&mut self) -> Option<Ticket> {
        if !self.can_submit() {
            debug!(
                "Submit ignored: loading={}, empty_idea={}",
                self.phase.is_loading(),
                self.idea_text.trim().is_empty()
            );
            return None;
        }

        self.latest_seq += 1;
        self.phase = Phase::Loading;
        info!("Recommendation requested: seq={}, goal={}", self.latest_seq, self.goal);

        Some(Ticket {
            seq: self.latest_seq,
            idea: self.idea_text.clone(),
            goal: self.goal,
        })
    }

    /// 写回请求结果
    ///
    /// 返回结果是否被采用。过期凭证（已被 reset 或更新的提交取代）会被丢弃。
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        outcome: Result<RecommendationResponse, RecommendError>,
    ) -> bool {
        if ticket.seq != self.latest_seq || !self.phase.is_loading() {
            debug!(
                "Discarding stale result: seq={}, latest={}",
                ticket.seq, self.latest_seq
            );
            return false;
        }

        self.phase = match outcome {
            Ok(result) => {
                info!("Recommendation ready: seq={}", ticket.seq);
                Phase::Success(result)
            }
            Err(e) => {
                error!("Recommendation failed: seq={}, error={}", ticket.seq, e);
                Phase::Failed(GENERIC_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    /// 状态快照（供 JSON 接口使用）
    pub fn snapshot(&self) -> StateResponse {
        let phase = match &self.phase {
            Phase::Idle => PhaseSnapshot::Idle,
            Phase::Loading => PhaseSnapshot::Loading,
            Phase::Success(result) => PhaseSnapshot::Success {
                result: result.clone(),
            },
            Phase::Failed(message) => PhaseSnapshot::Failed {
                message: message.clone(),
            },
        };

        StateResponse {
            idea_text: self.idea_text.clone(),
            optimization_goal: self.goal,
            can_submit: self.can_submit(),
            phase,
        }
    }

    /// 回到初始状态，并使在途请求失效
    pub fn reset(&mut self) {
        self.latest_seq += 1;
        self.phase = Phase::Idle;
        self.idea_text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use pretty_assertions::assert_eq;

    fn controller_with(idea: &str) -> Controller {
        let mut c = Controller::new();
        c.update_idea_text(idea);
        c
    }

    #[test]
    fn test_defaults() {
        let c = Controller::new();
        assert_eq!(c.goal(), OptimizationGoal::FastestToShip);
        assert_eq!(c.phase(), &Phase::Idle);
        assert_eq!(c.idea_text(), "");
    }

    #[test]
    fn test_submit_blank_is_noop() {
        for idea in ["", "   ", "\n\t "] {
            let mut c = controller_with(idea);
            assert!(c.submit().is_none());
            assert_eq!(c.phase(), &Phase::Idle);
        }
    }

    #[test]
    fn test_submit_enters_loading_and_blocks_resubmit() {
        let mut c = controller_with("a marketplace for used bikes");
        c.update_goal(OptimizationGoal::Cheapest);

        let ticket = c.submit().unwrap();
        assert_eq!(c.phase(), &Phase::Loading);
        assert_eq!(ticket.idea, "a marketplace for used bikes");
        assert_eq!(ticket.goal, OptimizationGoal::Cheapest);

        assert!(!c.can_submit());
        assert!(c.submit().is_none());
        assert_eq!(c.phase(), &Phase::Loading);
    }

    #[test]
    fn test_complete_success() {
        let mut c = controller_with("idea");
        let ticket = c.submit().unwrap();

        assert!(c.complete(&ticket, Ok(fixtures::sample())));
        assert_eq!(c.phase(), &Phase::Success(fixtures::sample()));
    }

    #[test]
    fn test_complete_failure_hides_detail() {
        let mut c = controller_with("idea");
        let ticket = c.submit().unwrap();

        assert!(c.complete(&ticket, Err(RecommendError::EmptyResponse)));
        assert_eq!(c.phase(), &Phase::Failed(GENERIC_ERROR_MESSAGE.to_string()));

        // 失败后可再次提交
        assert!(c.submit().is_some());
        assert_eq!(c.phase(), &Phase::Loading);
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut idle = controller_with("idea");
        idle.reset();
        assert_eq!(idle.phase(), &Phase::Idle);
        assert_eq!(idle.idea_text(), "");

        let mut loading = controller_with("idea");
        loading.submit().unwrap();
        loading.reset();
        assert_eq!(loading.phase(), &Phase::Idle);
        assert_eq!(loading.idea_text(), "");

        let mut done = controller_with("idea");
        let ticket = done.submit().unwrap();
        done.complete(&ticket, Ok(fixtures::sample()));
        done.reset();
        assert_eq!(done.phase(), &Phase::Idle);
        assert_eq!(done.idea_text(), "");
    }

    #[test]
    fn test_stale_result_after_reset_is_dropped() {
        let mut c = controller_with("idea");
        let ticket = c.submit().unwrap();
        c.reset();

        assert!(!c.complete(&ticket, Ok(fixtures::sample())));
        assert_eq!(c.phase(), &Phase::Idle);
    }

    #[test]
    fn test_snapshot() {
        let mut c = controller_with("idea");
        c.update_goal(OptimizationGoal::MostScalable);
        let snapshot = c.snapshot();
        assert_eq!(snapshot.phase, PhaseSnapshot::Idle);
        assert!(snapshot.can_submit);

        let ticket = c.submit().unwrap();
        assert_eq!(c.snapshot().phase, PhaseSnapshot::Loading);
        assert!(!c.snapshot().can_submit);

        c.complete(&ticket, Ok(fixtures::sample()));
        let snapshot = c.snapshot();
        assert_eq!(snapshot.idea_text, "idea");
        assert_eq!(snapshot.optimization_goal, OptimizationGoal::MostScalable);
        assert_eq!(
            snapshot.phase,
            PhaseSnapshot::Success {
                result: fixtures::sample()
            }
        );
    }

    #[test]
    fn test_stale_result_does_not_clobber_newer_request() {
        let mut c = controller_with("first");
        let old = c.submit().unwrap();
        c.reset();
        c.update_idea_text("second");
        let new = c.submit().unwrap();

        assert!(!c.complete(&old, Err(RecommendError::EmptyResponse)));
        assert_eq!(c.phase(), &Phase::Loading);

        assert!(c.complete(&new, Ok(fixtures::sample())));
        assert!(matches!(c.phase(), Phase::Success(_)));
    }
}
