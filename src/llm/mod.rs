//! LLM 模块
//!
//! 提供统一的 LLM 客户端（OpenAI / Anthropic 格式）与凭据链。

mod anthropic;
mod client;
mod credentials;
mod format;
mod openai;
mod types;

pub use client::{CompletionBackend, LlmClient};
pub use credentials::{mask_key, CredentialChain};
pub use types::*;
