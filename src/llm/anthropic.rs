//! Anthropic Messages API 实现

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::types::{ChatMessage, CompletionRequest, LlmError};
use crate::utils::truncate_chars;

/// Anthropic 请求载荷
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

/// Anthropic 响应
#[derive(Deserialize, Debug)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
}

#[derive(Deserialize, Debug)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

/// 调用 Anthropic API，返回第一个文本块
pub async fn complete_anthropic(
    client: &Client,
    api_key: &str,
    endpoint: Url,
    request: &CompletionRequest,
) -> Result<Option<String>, LlmError> {
    let payload = AnthropicRequest {
        model: &request.model,
        messages: vec![ChatMessage::user(request.prompt.as_str())],
        max_tokens: request.options.max_tokens,
        temperature: request.options.temperature,
    };

    debug!("Anthropic API request: endpoint={}, model={}", endpoint, request.model);

    let response = client
        .post(endpoint)
        .header("Content-Type", "application/json")
        .header("x-api-key", api_key)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("anthropic-version", "2023-06-01")
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let error_text = response.text().await.unwrap_or_default();
        error!(
            "Anthropic API error: status={}, body={}",
            status_code,
            truncate_chars(&error_text, 500)
        );
        return Err(LlmError::ApiError {
            status: status_code,
            message: error_text,
        });
    }

    let body = response.text().await?;
    parse_anthropic_response(&body)
}

fn parse_anthropic_response(body: &str) -> Result<Option<String>, LlmError> {
    let parsed: AnthropicResponse = serde_json::from_str(body)?;
    Ok(parsed
        .content
        .into_iter()
        .find(|block| block.block_type == "text")
        .and_then(|block| block.text))
}
