//! 配置管理端点

use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::config::{get_config, reload_config, update_config, AppConfig};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// 配置响应（隐藏 api_key 的实际值）
#[derive(Serialize)]
pub struct ConfigResponse {
    /// 是否已设置 API 密钥
    pub api_key_set: bool,
    /// API 基础 URL
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// 是否记录请求日志
    pub request_log: bool,
}

impl From<AppConfig> for ConfigResponse {
    fn from(config: AppConfig) -> Self {
        Self {
            api_key_set: !config.api_key.is_empty(),
            base_url: config.base_url,
            model: config.model,
            timeout_secs: config.timeout_secs,
            request_log: config.request_log,
        }
    }
}

/// 配置更新请求
#[derive(Deserialize)]
pub struct ConfigUpdateRequest {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub request_log: Option<bool>,
}

/// 配置更新响应
#[derive(Serialize)]
pub struct ConfigUpdateResponse {
    pub success: bool,
    pub message: String,
}

/// 获取当前配置
async fn get_config_handler() -> Json<ConfigResponse> {
    Json(ConfigResponse::from(get_config()))
}

/// 更新配置
async fn update_config_handler(
    payload: Result<Json<ConfigUpdateRequest>, JsonRejection>,
) -> AppResult<Json<ConfigUpdateResponse>> {
    let Json(req) = payload?;
    if req.timeout_secs == Some(0) {
        return Err(AppError::BadRequest("timeout_secs must be positive".to_string()));
    }

    let config = update_config(|config| {
        if let Some(api_key) = &req.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &req.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(model) = &req.model {
            config.model = model.clone();
        }
        if let Some(timeout_secs) = req.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(request_log) = req.request_log {
            config.request_log = request_log;
        }
    })?;
    info!("Config updated: model={}, api_key_set={}", config.model, !config.api_key.is_empty());

    Ok(Json(ConfigUpdateResponse {
        success: true,
        message: "Config updated successfully".to_string(),
    }))
}

/// 重新读取配置文件和环境变量
async fn reload_config_handler() -> Json<ConfigResponse> {
    reload_config();
    Json(ConfigResponse::from(get_config()))
}

/// 创建配置路由
pub fn config_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/config", get(get_config_handler))
        .route("/api/config", put(update_config_handler))
        .route("/api/config/reload", post(reload_config_handler))
}
