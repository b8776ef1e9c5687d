//! 会话：把控制器和推荐服务连接起来
//!
//! 提交时在锁内签发凭证，锁外发起网络调用，完成后再加锁写回。

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::controller::Controller;
use crate::models::{OptimizationGoal, StateResponse};
use crate::services::Recommender;

/// 一个界面实例的会话
#[derive(Clone)]
pub struct Session {
    controller: Arc<Mutex<Controller>>,
    recommender: Arc<dyn Recommender>,
}

impl Session {
    pub fn new(recommender: Arc<dyn Recommender>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(Controller::new())),
            recommender,
        }
    }

    /// 只读访问控制器
    pub fn with_controller<R>(&self, f: impl FnOnce(&Controller) -> R) -> R {
        f(&self.controller.lock())
    }

    pub fn snapshot(&self) -> StateResponse {
        self.controller.lock().snapshot()
    }

    pub fn update_idea_text(&self, text: impl Into<String>) {
        self.controller.lock().update_idea_text(text);
    }

    pub fn update_goal(&self, goal: OptimizationGoal) {
        self.controller.lock().update_goal(goal);
    }

    /// 提交
    ///
    /// 状态在返回前已同步切换为 `Loading`；被忽略的提交返回 `None`。
    /// 返回的任务句柄结束时给出结果是否被采用。
    pub fn submit(&self) -> Option<JoinHandle<bool>> {
        let ticket = self.controller.lock().submit()?;

        let controller = Arc::clone(&self.controller);
        let recommender = Arc::clone(&self.recommender);
        Some(tokio::spawn(async move {
            let outcome = recommender.recommend(&ticket.idea, ticket.goal).await;
            let applied = controller.lock().complete(&ticket, outcome);
            debug!("Recommendation settled: seq={}, applied={}", ticket.seq, applied);
            applied
        }))
    }

    pub fn reset(&self) {
        self.controller.lock().reset();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    use crate::models::{OptimizationGoal, RecommendationResponse};
    use crate::services::{RecommendError, Recommender};

    type Outcome = Result<RecommendationResponse, RecommendError>;

    /// 按调用顺序返回预设结果的假推荐服务
    ///
    /// 每次调用都会等待对应的 oneshot，测试可以控制结果何时到达。
    #[derive(Default)]
    pub struct FakeRecommender {
        pending: Mutex<VecDeque<oneshot::Receiver<Outcome>>>,
        pub calls: Mutex<Vec<(String, OptimizationGoal)>>,
    }

    impl FakeRecommender {
        /// 预约下一次调用，返回用于投递结果的发送端
        pub fn expect_call(&self) -> oneshot::Sender<Outcome> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().push_back(rx);
            tx
        }
    }

    #[async_trait]
    impl Recommender for FakeRecommender {
        async fn recommend(
            &self,
            idea_description: &str,
            optimization_goal: OptimizationGoal,
        ) -> Outcome {
            self.calls
                .lock()
                .push((idea_description.to_string(), optimization_goal));
            let rx = self.pending.lock().pop_front();
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(RecommendError::TransportFailure("dropped".into()))),
                None => Err(RecommendError::TransportFailure("unexpected call".into())),
            }
        }
    }
}
