//! 推荐服务
//!
//! 把想法和优化目标发给补全服务，按 schema 约束解析返回的 JSON。

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use super::prompt_service::PromptService;
use super::schema::{response_schema, validate};
use crate::config::{get_config, AppConfig};
use crate::llm::{GenerateRequest, GenerationConfig, LlmClient, LlmError};
use crate::models::{OptimizationGoal, RecommendationResponse};
use crate::utils::RequestLogger;

/// 推荐失败原因
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// 服务没有返回文本
    #[error("empty response")]
    EmptyResponse,

    /// 文本不是合法 JSON 或不符合 schema
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// 网络、服务端或凭证错误
    #[error("transport failure: {0}")]
    TransportFailure(String),
}

impl RecommendError {
    /// 错误类别（写入请求日志）
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendError::EmptyResponse => "empty_response",
            RecommendError::MalformedResponse(_) => "malformed_response",
            RecommendError::TransportFailure(_) => "transport_failure",
        }
    }
}

impl From<LlmError> for RecommendError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::JsonError(e) => RecommendError::TransportFailure(format!("invalid envelope: {}", e)),
            other => RecommendError::TransportFailure(other.to_string()),
        }
    }
}

/// 推荐接口
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(
        &self,
        idea_description: &str,
        optimization_goal: OptimizationGoal,
    ) -> Result<RecommendationResponse, RecommendError>;
}

/// 解析并校验服务返回的文本
pub fn parse_response(text: &str) -> Result<RecommendationResponse, RecommendError> {
    if text.is_empty() {
        return Err(RecommendError::EmptyResponse);
    }

    let doc: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| RecommendError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    validate(response_schema(), &doc)
        .map_err(|violations| RecommendError::MalformedResponse(violations.join("; ")))?;

    serde_json::from_value(doc).map_err(|e| RecommendError::MalformedResponse(e.to_string()))
}

/// 基于补全服务的推荐客户端
pub struct RecommendationClient {
    /// 客户端构建失败时保留原始错误，调用时原样报告
    client: Result<LlmClient, LlmError>,
    model: String,
    timeout: Duration,
    prompts: PromptService,
    request_logger: Option<Arc<RequestLogger>>,
}

impl RecommendationClient {
    /// 按配置创建
    ///
    /// 未配置 API Key 或客户端构建失败时仍然创建成功，调用时返回 `TransportFailure`。
    pub fn from_config(config: &AppConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = LlmClient::new(&config.api_key, &config.base_url, timeout);
        if let Err(e) = &client {
            warn!("LLM client unavailable: {}", e);
        }

        let request_logger = config
            .request_log
            .then(|| Arc::new(RequestLogger::new(config.log_dir.clone())));

        Self {
            client,
            model: config.model.clone(),
            timeout,
            prompts: PromptService::new(),
            request_logger,
        }
    }

    /// 读取当前全局配置
    pub fn from_current_config() -> Self {
        Self::from_config(&get_config())
    }

    /// 构建请求载荷
    pub fn build_payload(&self, idea: &str, goal: OptimizationGoal) -> GenerateRequest {
        GenerateRequest {
            system_instruction: Some(self.prompts.system_instruction()),
            contents: self.prompts.build_contents(idea, goal),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(response_schema().clone()),
            }),
        }
    }

    async fn call(
        &self,
        client: &LlmClient,
        payload: &GenerateRequest,
    ) -> Result<(RecommendationResponse, usize), RecommendError> {
        let text = client
            .generate_text(&self.model, payload)
            .await?
            .ok_or(RecommendError::EmptyResponse)?;
        debug!("Recommendation text received: {} bytes", text.len());

        let response = parse_response(&text)?;
        Ok((response, text.len()))
    }
}

#[async_trait]
impl Recommender for RecommendationClient {
    async fn recommend(
        &self,
        idea_description: &str,
        optimization_goal: OptimizationGoal,
    ) -> Result<RecommendationResponse, RecommendError> {
        let client = match &self.client {
            Ok(client) => client,
            Err(e) => {
                let e = RecommendError::TransportFailure(e.to_string());
                error!("Recommendation error: {}", e);
                return Err(e);
            }
        };

        let payload = self.build_payload(idea_description, optimization_goal);
        let start = Instant::now();
        let entry = self.request_logger.as_ref().map(|logger| {
            logger.log_request(
                &RequestLogger::generate_request_id(),
                &client.endpoint(&self.model),
                &self.model,
                optimization_goal.label(),
                idea_description,
                self.timeout.as_secs(),
                client.api_key(),
            )
        });

        let result = self.call(client, &payload).await;

        match (&result, self.request_logger.as_ref(), entry) {
            (Ok((_, len)), Some(logger), Some(entry)) => logger.log_success(entry, start, *len),
            (Err(e), Some(logger), Some(entry)) => logger.log_error(entry, start, e.kind(), &e.to_string()),
            _ => {}
        }

        match result {
            Ok((response, _)) => Ok(response),
            Err(e) => {
                error!("Recommendation error: {}", e);
                Err(e)
            }
        }
    }
}

/// 每次调用都按最新全局配置创建客户端
///
/// 配置接口修改 API Key 或模型后无需重启即可生效。
pub struct ConfiguredRecommender;

#[async_trait]
impl Recommender for ConfiguredRecommender {
    async fn recommend(
        &self,
        idea_description: &str,
        optimization_goal: OptimizationGoal,
    ) -> Result<RecommendationResponse, RecommendError> {
        RecommendationClient::from_current_config()
            .recommend(idea_description, optimization_goal)
            .await
    }
}
