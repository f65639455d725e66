//! 接口格式选择与端点构建

use reqwest::Url;

use super::types::LlmError;

/// 生成接口的线协议
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    /// OpenAI Chat Completions
    OpenAi,
    /// Anthropic Messages
    Anthropic,
}

impl ApiFormat {
    /// 模型名包含 "claude"（大小写不敏感）时使用 Anthropic 格式
    pub fn from_model(model: &str) -> Self {
        if model.to_lowercase().contains("claude") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAi
        }
    }

    /// 端点在 `/v1` 之后的路径段
    fn path(self) -> &'static [&'static str] {
        match self {
            ApiFormat::OpenAi => &["chat", "completions"],
            ApiFormat::Anthropic => &["messages"],
        }
    }

    /// 在基础地址上拼出完整端点
    ///
    /// 空路径段（多余的斜杠）会被丢弃；基础地址已经指向端点时原样使用，
    /// 已以 `v1` 结尾时不再重复追加
    pub fn endpoint(self, base: &Url) -> Url {
        let mut segments: Vec<&str> = base
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let tail = self.path();
        let has_tail = segments.len() >= tail.len()
            && segments[segments.len() - tail.len()..] == *tail;
        if !has_tail {
            if segments.last() != Some(&"v1") {
                segments.push("v1");
            }
            segments.extend_from_slice(tail);
        }

        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }
}

/// 解析并校验基础地址
pub fn parse_base_url(base_url: &str) -> Result<Url, LlmError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(LlmError::ConfigError("Base URL is required".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| LlmError::ConfigError(format!("invalid base URL {}: {}", trimmed, e)))?;
    if url.cannot_be_a_base() {
        return Err(LlmError::ConfigError(format!("invalid base URL {}", trimmed)));
    }
    Ok(url)
}
