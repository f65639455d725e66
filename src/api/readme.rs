//! README 生成端点

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::services::readme_generator::{ProcessedRepository, SourceFile};
use crate::state::AppState;

/// 创建 README 生成路由
pub fn readme_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/process-repo", post(process_repo))
        .route("/api/generate", post(generate_docs))
}

/// 处理仓库请求
#[derive(Debug, Deserialize)]
pub struct ProcessRepoRequest {
    pub url: Option<String>,
}

/// 单个输入文件
#[derive(Debug, Deserialize)]
pub struct FileInput {
    pub path: Option<String>,
    pub content: Option<String>,
}

/// 按文件列表生成请求
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub files: Option<Vec<FileInput>>,
}

/// 按文件列表生成响应
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub readme: String,
}

/// 分析仓库并生成 README
async fn process_repo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProcessRepoRequest>, JsonRejection>,
) -> AppResult<Json<ProcessedRepository>> {
    let Json(req) = payload?;
    let url = req
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Invalid repository URL".to_string()))?;

    info!("Received process-repo request: url={}", url);
    let result = state.pipeline.process_repository(url.trim()).await?;
    Ok(Json(result))
}

/// 根据文件列表生成 AutoDoc 文档
async fn generate_docs(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(req) = payload?;
    let files: Vec<SourceFile> = req
        .files
        .unwrap_or_default()
        .into_iter()
        .map(|file| {
            SourceFile::new(
                file.path.unwrap_or_default(),
                file.content.unwrap_or_default(),
            )
        })
        .collect();

    info!("Received generate request: {} files", files.len());
    let readme = state.pipeline.generate_from_files(&files).await?;
    Ok(Json(GenerateResponse { readme }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_api_routes;
    use crate::github::{GitHubError, RepoFetcher, RepoHost, RepositoryIdentity, TreeEntry};
    use crate::llm::CredentialChain;
    use crate::services::llm_service::testing::EchoBackend;
    use crate::services::readme_generator::prompts::AUTODOC_SECTIONS;
    use crate::services::readme_generator::ReadmePipeline;
    use crate::services::LlmService;
    use crate::state::create_shared_state;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// 只认识 "owner/app" 的仓库，内含一个 README
    struct SingleRepoHost;

    #[async_trait]
    impl RepoHost for SingleRepoHost {
        async fn repository_exists(&self, repo: &RepositoryIdentity) -> Result<bool, GitHubError> {
            Ok(repo.to_string() == "owner/app")
        }

        async fn list_tree(&self, _repo: &RepositoryIdentity) -> Result<Vec<TreeEntry>, GitHubError> {
            Ok(vec![TreeEntry {
                path: "README.md".to_string(),
                entry_type: "blob".to_string(),
                size: Some(32),
            }])
        }

        async fn fetch_raw(
            &self,
            _repo: &RepositoryIdentity,
            _path: &str,
        ) -> Result<String, GitHubError> {
            Ok("# App\n\n## Installation\n\n## Usage\n".to_string())
        }
    }

    fn app() -> Router {
        let chain = CredentialChain::new([Some("k1")]).unwrap();
        let llm = LlmService::new(
            Arc::new(EchoBackend("## Project Overview\n\nAn app.".to_string())),
            chain,
            "gpt-4o-mini",
        );
        let pipeline = ReadmePipeline::new(Arc::new(SingleRepoHost), RepoFetcher::default(), llm);
        create_api_routes(create_shared_state(pipeline))
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_process_repo_rejects_missing_url() {
        let (status, body) = post_json("/api/process-repo", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");

        let (status, body) = post_json("/api/process-repo", r#"{"url": 42}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = post_json("/api/generate", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_process_repo_invalid_url() {
        let (status, body) =
            post_json("/api/process-repo", r#"{"url": "https://gitlab.com/a/b"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_url");
    }

    #[tokio::test]
    async fn test_process_repo_not_found() {
        let (status, body) =
            post_json("/api/process-repo", r#"{"url": "https://github.com/owner/other"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "repository_not_found");
    }

    #[tokio::test]
    async fn test_process_repo_success_shape() {
        let (status, body) =
            post_json("/api/process-repo", r#"{"url": "https://github.com/owner/app"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["repository"], "owner/app");
        assert_eq!(
            body["missingSections"],
            json!(["Features", "Contributing", "License", "Acknowledgements"])
        );
        assert_eq!(body["existingReadme"], "# App\n\n## Installation\n\n## Usage\n");
        assert_eq!(body["omittedFiles"], 0);
        assert!(body["generatedReadme"]
            .as_str()
            .unwrap()
            .ends_with("## Project Overview\n\nAn app.\n"));
    }

    #[tokio::test]
    async fn test_generate_validates_files() {
        let (status, _) = post_json("/api/generate", r#"{"files": []}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            post_json("/api/generate", r#"{"files": [{"path": "a.js"}]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_generate_returns_readme() {
        let payload = json!({
            "files": [
                {"path": "package.json", "content": "{\"name\":\"demo\"}"},
                {"path": "src/app.js", "content": "console.log('hi')"}
            ]
        });
        let (status, body) = post_json("/api/generate", &payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let readme = body["readme"].as_str().unwrap();
        let headings: Vec<&str> = readme
            .lines()
            .filter(|l| l.starts_with("## "))
            .map(|l| &l[3..])
            .collect();
        assert_eq!(headings, AUTODOC_SECTIONS.to_vec());
    }
}
