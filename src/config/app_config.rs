//! 应用配置管理
//!
//! 配置在进程启动时加载一次：默认值 → 可执行文件同级的 `config.json` → 环境变量。
//! 加载完成后只读，使用全局单例管理。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// 获取配置文件路径
fn get_config_path() -> PathBuf {
    // 配置文件位于可执行文件同级目录
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 主 LLM API 密钥
    #[serde(default)]
    pub api_key: String,

    /// 备用 LLM API 密钥（按顺序尝试）
    #[serde(default)]
    pub fallback_api_keys: Vec<String>,

    /// GitHub 访问令牌
    #[serde(default)]
    pub github_token: String,

    /// 是否把 GitHub 令牌作为最后一个 LLM 备用密钥
    #[serde(default = "default_true")]
    pub github_token_as_llm_fallback: bool,

    /// LLM API 基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,

    /// GitHub REST API 地址
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// LLM 单次请求超时（秒）
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    /// GitHub 单次请求超时（秒）
    #[serde(default = "default_github_timeout_secs")]
    pub github_timeout_secs: u64,

    /// 单个文件拉取的截止时间（秒）
    #[serde(default = "default_file_fetch_timeout_secs")]
    pub file_fetch_timeout_secs: u64,

    /// 服务监听地址
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    120
}

fn default_github_timeout_secs() -> u64 {
    30
}

fn default_file_fetch_timeout_secs() -> u64 {
    30
}

fn default_bind_addr() -> String {
    "127.0.0.1:8765".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            fallback_api_keys: Vec::new(),
            github_token: String::new(),
            github_token_as_llm_fallback: default_true(),
            base_url: default_base_url(),
            model: default_model(),
            github_api_url: default_github_api_url(),
            llm_timeout_secs: default_llm_timeout_secs(),
            github_timeout_secs: default_github_timeout_secs(),
            file_fetch_timeout_secs: default_file_fetch_timeout_secs(),
            bind_addr: default_bind_addr(),
        }
    }
}

impl AppConfig {
    /// 用环境变量覆盖配置
    ///
    /// 只有非空的变量才会生效
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("OPENAI_API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = var("OPENAI_FALLBACK_API_KEYS") {
            self.fallback_api_keys = v
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
        }
        if let Some(v) = var("GITHUB_ACCESS_TOKEN") {
            self.github_token = v;
        }
        if let Some(v) = var("OPENAI_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = var("LLM_MODEL") {
            self.model = v;
        }
        if let Some(v) = var("AUTODOC_BIND_ADDR") {
            self.bind_addr = v;
        }
    }

    /// GitHub 令牌（未配置时为 None）
    pub fn github_token(&self) -> Option<String> {
        let token = self.github_token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

/// 全局配置单例
static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let mut config = load_config_from_file().unwrap_or_default();
    config.apply_env(|name| std::env::var(name).ok());
    config
});

/// 从文件加载配置
fn load_config_from_file() -> Option<AppConfig> {
    let path = get_config_path();
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

/// 获取当前配置
pub fn get_config() -> &'static AppConfig {
    &CONFIG
}
