//! 应用状态管理
//!
//! 定义在请求处理器之间共享的状态。

use std::sync::Arc;

use crate::services::{ConfiguredRecommender, Recommender};
use crate::ui::Session;

/// 应用共享状态
///
/// 使用 Arc 包裹以便在多个处理器之间安全共享
#[derive(Clone)]
pub struct AppState {
    /// 页面会话（单用户本地界面只有一个）
    pub session: Session,
    /// 推荐服务
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(recommender: Arc<dyn Recommender>) -> Self {
        Self {
            session: Session::new(Arc::clone(&recommender)),
            recommender,
        }
    }

    /// 使用全局配置驱动的推荐服务
    pub fn from_config() -> Self {
        Self::new(Arc::new(ConfiguredRecommender))
    }
}

/// 创建可共享的应用状态
pub fn create_shared_state() -> Arc<AppState> {
    Arc::new(AppState::from_config())
}
