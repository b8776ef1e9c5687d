//! generateContent 客户端

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

use super::format::build_generate_endpoint;
use super::types::{GenerateRequest, GenerateResponse, LlmError};

/// LLM 客户端
///
/// 每次调用只发出一次请求，不重试、不流式读取。
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::ConfigError("API Key is required".to_string()));
        }

        // 构建 HTTP 客户端
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(LlmError::HttpError)?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
        })
    }

    /// 请求端点
    pub fn endpoint(&self, model: &str) -> String {
        build_generate_endpoint(&self.base_url, model)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// 调用 generateContent，返回完整响应
    pub async fn generate_content(
        &self,
        model: &str,
        payload: &GenerateRequest,
    ) -> Result<GenerateResponse, LlmError> {
        let endpoint = self.endpoint(model);
        info!("LLM request: model={}", model);
        debug!("generateContent request: endpoint={}, model={}", endpoint, model);

        let response = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(payload)
            .send()
            .await?;

        // 检查状态码
        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = response.text().await.unwrap_or_default();
            let preview: String = error_text.chars().take(500).collect();
            error!("generateContent API error: status={}, body={}", status_code, preview);
            return Err(LlmError::ApiError {
                status: status_code,
                message: error_text,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &parsed.usage_metadata {
            info!(
                "LLM usage: prompt_tokens={:?}, candidates_tokens={:?}, total_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }
        debug!("generateContent response: finish_reason={:?}", parsed.finish_reason());

        Ok(parsed)
    }

    /// 调用 generateContent，只返回文本（无文本时为 `None`）
    pub async fn generate_text(
        &self,
        model: &str,
        payload: &GenerateRequest,
    ) -> Result<Option<String>, LlmError> {
        Ok(self.generate_content(model, payload).await?.text())
    }
}
