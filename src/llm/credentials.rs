//! 凭据链
//!
//! 进程启动时构建一次的有序 API 密钥列表。顺序即回退优先级，构建后不再修改。

use crate::config::AppConfig;

use super::types::LlmError;

/// 有序、非空的凭据链
#[derive(Clone)]
pub struct CredentialChain {
    keys: Vec<String>,
}

impl CredentialChain {
    /// 从候选列表构建凭据链
    ///
    /// 丢弃空白项与重复项，保持原有顺序；结果为空时返回错误
    pub fn new<I, S>(candidates: I) -> Result<Self, LlmError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = Vec::new();
        for candidate in candidates.into_iter().flatten() {
            let key = candidate.into().trim().to_string();
            if key.is_empty() || keys.contains(&key) {
                continue;
            }
            keys.push(key);
        }

        if keys.is_empty() {
            return Err(LlmError::ConfigError(
                "No LLM API key configured (set OPENAI_API_KEY or config.json api_key)".to_string(),
            ));
        }

        Ok(Self { keys })
    }

    /// 按配置构建：主密钥 → 备用密钥 → GitHub 令牌（如启用）
    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        let github = config
            .github_token_as_llm_fallback
            .then(|| config.github_token.clone());

        let candidates = std::iter::once(Some(config.api_key.clone()))
            .chain(config.fallback_api_keys.iter().cloned().map(Some))
            .chain(std::iter::once(github));

        Self::new(candidates)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// 按优先级遍历凭据
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl std::fmt::Debug for CredentialChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.keys.iter().map(|k| mask_key(k)))
            .finish()
    }
}

/// 脱敏显示密钥
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}****", prefix)
}
