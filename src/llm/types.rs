//! LLM 类型定义

use serde::{Deserialize, Serialize};

/// 聊天消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// 角色：system, user, assistant
    pub role: String,
    /// 消息内容
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// 生成选项
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOptions {
    /// 最大输出 token 数
    pub max_tokens: u32,
    /// 温度参数（None 表示使用服务端默认值）
    pub temperature: Option<f64>,
}

impl GenerationOptions {
    pub fn new(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// 单轮补全请求
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// 模型名称
    pub model: String,
    /// 单轮用户 prompt
    pub prompt: String,
    /// 生成选项
    pub options: GenerationOptions,
}

/// LLM 错误类型
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP 请求错误
    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API 返回错误
    #[error("API 错误 ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// 所有凭据都被拒绝
    #[error("所有 API 密钥均已失效 (尝试 {attempts} 个)")]
    CredentialsExhausted { attempts: usize },

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// JSON 解析错误
    #[error("JSON 解析失败: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LlmError {
    /// 是否为鉴权类失败（401/403），此类错误可以切换到下一个凭据
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, LlmError::ApiError { status: 401 | 403, .. })
    }
}
