//! LLM 服务封装
//!
//! 在凭据链上依次调用生成后端：鉴权失败切换下一个凭据，其他错误立即返回。

use std::sync::Arc;
use tracing::{info, warn};

use crate::llm::{
    mask_key, CompletionBackend, CompletionRequest, CredentialChain, GenerationOptions, LlmError,
};

/// 单次尝试的结果
#[derive(Debug)]
enum AttemptOutcome {
    /// 成功（空候选视为空字符串）
    Success(String),
    /// 鉴权失败，可以尝试下一个凭据
    Rejected(LlmError),
    /// 其他错误，终止整个调用
    Fatal(LlmError),
}

impl From<Result<Option<String>, LlmError>> for AttemptOutcome {
    fn from(result: Result<Option<String>, LlmError>) -> Self {
        match result {
            Ok(text) => AttemptOutcome::Success(text.unwrap_or_default()),
            Err(e) if e.is_auth_failure() => AttemptOutcome::Rejected(e),
            Err(e) => AttemptOutcome::Fatal(e),
        }
    }
}

/// LLM 服务
///
/// 凭据链与模型在进程启动时确定，之后只读共享
#[derive(Clone)]
pub struct LlmService {
    backend: Arc<dyn CompletionBackend>,
    credentials: CredentialChain,
    model: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        credentials: CredentialChain,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            credentials,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 生成文本
    ///
    /// 凭据严格按顺序逐个尝试，每个凭据只尝试一次
    pub async fn generate(
        &self,
        prompt: impl Into<String>,
        options: GenerationOptions,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.into(),
            options,
        };

        let mut attempts = 0;
        for key in self.credentials.iter() {
            attempts += 1;
            match AttemptOutcome::from(self.backend.complete(key, &request).await) {
                AttemptOutcome::Success(text) => {
                    if attempts > 1 {
                        info!("LLM request succeeded with fallback key #{}", attempts);
                    }
                    return Ok(text);
                }
                AttemptOutcome::Rejected(e) => {
                    warn!(
                        "API key #{} ({}) rejected, trying next: {}",
                        attempts,
                        mask_key(key),
                        e
                    );
                }
                AttemptOutcome::Fatal(e) => return Err(e),
            }
        }

        Err(LlmError::CredentialsExhausted { attempts })
    }
}
