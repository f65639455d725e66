//! 统一错误处理模块
//!
//! 定义应用级错误类型，并实现 axum 的 IntoResponse trait 以便自动转换为 HTTP 响应。
//! 每个错误都带有稳定的错误码，便于调用方判断。

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::llm::LlmError;
use crate::services::readme_generator::PipelineError;

/// 应用错误枚举
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求参数错误
    #[error("{0}")]
    BadRequest(String),

    /// 无效的仓库地址
    #[error("{0}")]
    InvalidUrl(String),

    /// 仓库不存在
    #[error("{0}")]
    NotFound(String),

    /// 仓库中没有可用文件
    #[error("{0}")]
    NoFiles(String),

    /// 拉取仓库内容失败
    #[error("拉取失败: {0}")]
    Fetch(String),

    /// LLM 生成失败
    #[error("生成失败: {0}")]
    Generation(String),

    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AppError {
    /// 稳定的错误码
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "invalid_request",
            AppError::InvalidUrl(_) => "invalid_url",
            AppError::NotFound(_) => "repository_not_found",
            AppError::NoFiles(_) => "no_files",
            AppError::Fetch(_) => "fetch_failed",
            AppError::Generation(_) => "generation_failed",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidUrl(_) | AppError::NoFiles(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Fetch(_)
            | AppError::Generation(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidUrl(_) => AppError::InvalidUrl("Invalid GitHub URL format".to_string()),
            PipelineError::InvalidInput(msg) => AppError::BadRequest(msg),
            PipelineError::NotFound(_) => {
                AppError::NotFound("Repository not found or access denied".to_string())
            }
            PipelineError::NoFiles(_) => AppError::NoFiles("No files found in repository".to_string()),
            e @ (PipelineError::ExistenceCheck(_) | PipelineError::Fetch(_)) => {
                AppError::Fetch(e.to_string())
            }
            PipelineError::Generation(e @ LlmError::ConfigError(_)) => AppError::Config(e.to_string()),
            PipelineError::Generation(e @ LlmError::JsonError(_)) => AppError::Internal(e.to_string()),
            PipelineError::Generation(e) => AppError::Generation(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: code={}, error={}", self.code(), self);
        }

        let body = Json(json!({
            "success": false,
            "code": self.code(),
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{FetchError, GitHubError};

    #[test]
    fn test_pipeline_error_mapping() {
        let cases = [
            (PipelineError::InvalidUrl("x".into()), "invalid_url", 400),
            (PipelineError::InvalidInput("bad".into()), "invalid_request", 400),
            (PipelineError::NotFound("o/r".into()), "repository_not_found", 404),
            (PipelineError::NoFiles("o/r".into()), "no_files", 400),
            (
                PipelineError::Fetch(FetchError::ListingFailed(GitHubError::Timeout("tree".into()))),
                "fetch_failed",
                500,
            ),
            (
                PipelineError::ExistenceCheck(GitHubError::Api {
                    status: 502,
                    message: "bad gateway".into(),
                }),
                "fetch_failed",
                500,
            ),
            (
                PipelineError::Generation(LlmError::CredentialsExhausted { attempts: 2 }),
                "generation_failed",
                500,
            ),
            (
                PipelineError::Generation(LlmError::ConfigError("no base url".into())),
                "config_error",
                500,
            ),
            (
                PipelineError::Generation(LlmError::JsonError(
                    serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
                )),
                "internal_error",
                500,
            ),
        ];

        for (err, code, status) in cases {
            let app_err = AppError::from(err);
            assert_eq!(app_err.code(), code);
            assert_eq!(app_err.status().as_u16(), status);
        }
    }

    #[test]
    fn test_input_message_is_kept() {
        let err = AppError::from(PipelineError::InvalidInput("Each file must have".into()));
        assert_eq!(err.to_string(), "Each file must have");
    }

    #[tokio::test]
    async fn test_response_body() {
        let response = AppError::NotFound("Repository not found or access denied".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "repository_not_found");
        assert_eq!(body["error"], "Repository not found or access denied");
    }
}
