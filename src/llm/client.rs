//! 统一 LLM 客户端

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::info;

use super::anthropic::complete_anthropic;
use super::format::{parse_base_url, ApiFormat};
use super::openai::complete_openai;
use super::types::{CompletionRequest, LlmError};

/// 文本生成后端
///
/// 凭据由调用方逐次传入，便于在凭据链上按顺序切换
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// 发送单轮请求，返回第一个候选文本（可能为空）
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<Option<String>, LlmError>;
}

/// 统一 LLM 客户端
///
/// 支持 OpenAI 和 Anthropic API 格式，根据模型名称自动选择
pub struct LlmClient {
    client: Client,
    base_url: Url,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let base_url = parse_base_url(&base_url.into())?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(LlmError::HttpError)?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<Option<String>, LlmError> {
        let api_format = ApiFormat::from_model(&request.model);
        let endpoint = api_format.endpoint(&self.base_url);
        info!(
            "LLM request: model={}, api_format={:?}, max_tokens={}",
            request.model, api_format, request.options.max_tokens
        );

        match api_format {
            ApiFormat::OpenAi => {
                complete_openai(&self.client, api_key, endpoint, request).await
            }
            ApiFormat::Anthropic => {
                complete_anthropic(&self.client, api_key, endpoint, request).await
            }
        }
    }
}
