//! OpenAI Chat Completions API 实现

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::types::{ChatMessage, CompletionRequest, LlmError};
use crate::utils::truncate_chars;

/// OpenAI 请求载荷
#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

/// OpenAI 响应
#[derive(Deserialize, Debug)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize, Debug)]
struct OpenAiChoice {
    message: Option<OpenAiMessage>,
}

#[derive(Deserialize, Debug)]
struct OpenAiMessage {
    content: Option<String>,
}

/// 调用 OpenAI API，返回第一个候选的文本
pub async fn complete_openai(
    client: &Client,
    api_key: &str,
    endpoint: Url,
    request: &CompletionRequest,
) -> Result<Option<String>, LlmError> {
    let payload = OpenAiRequest {
        model: &request.model,
        messages: vec![ChatMessage::user(request.prompt.as_str())],
        max_tokens: request.options.max_tokens,
        temperature: request.options.temperature,
    };

    debug!("OpenAI API request: endpoint={}, model={}", endpoint, request.model);

    let response = client
        .post(endpoint)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let error_text = response.text().await.unwrap_or_default();
        error!(
            "OpenAI API error: status={}, body={}",
            status_code,
            truncate_chars(&error_text, 500)
        );
        return Err(LlmError::ApiError {
            status: status_code,
            message: error_text,
        });
    }

    let body = response.text().await?;
    parse_openai_response(&body)
}

/// 解析响应体，取第一个候选的内容
fn parse_openai_response(body: &str) -> Result<Option<String>, LlmError> {
    let parsed: OpenAiResponse = serde_json::from_str(body)?;
    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content))
}
