//! GitHub REST API 客户端

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{RepositoryIdentity, TreeEntry};

/// 文件内容的最大字节数（与拉取准入阈值一致）
pub const MAX_CONTENT_BYTES: u64 = 100_000;

/// 源码托管服务
///
/// 拉取器与编排器只依赖该 trait，便于在测试中替换
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// 仓库是否存在（不存在或无权限访问均为 false）
    async fn repository_exists(&self, repo: &RepositoryIdentity) -> Result<bool, GitHubError>;

    /// 列出默认分支的完整文件树（按服务端顺序）
    async fn list_tree(&self, repo: &RepositoryIdentity) -> Result<Vec<TreeEntry>, GitHubError>;

    /// 拉取单个文件的原始文本
    async fn fetch_raw(&self, repo: &RepositoryIdentity, path: &str)
        -> Result<String, GitHubError>;
}

/// GitHub 错误类型
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// HTTP 请求错误
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// 令牌缺失或无效
    #[error("GitHub 鉴权失败 ({status})")]
    Unauthorized { status: u16 },

    /// 资源不存在
    #[error("GitHub 资源不存在: {0}")]
    NotFound(String),

    /// API 返回其他错误
    #[error("GitHub API 错误 ({status}): {message}")]
    Api { status: u16, message: String },

    /// 内容不是 UTF-8 文本
    #[error("非文本内容: {0}")]
    NotText(String),

    /// 内容超出大小限制
    #[error("文件过大: {path} ({size} 字节)")]
    TooLarge { path: String, size: u64 },

    /// 超过截止时间
    #[error("请求超时: {0}")]
    Timeout(String),

    /// 地址构建失败
    #[error("无效的 API 地址: {0}")]
    InvalidUrl(String),

    /// JSON 解析错误
    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// `GET /git/trees` 响应
#[derive(Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

/// GitHub REST API 客户端
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// 创建新的 GitHub 客户端
    pub fn new(
        api_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GitHubError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(15))
            .user_agent(concat!("autodoc-backend/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// 构建 `/repos/{owner}/{repo}/...` 地址，每一段都会被转义
    fn repo_url<'a, I>(&self, repo: &RepositoryIdentity, tail: I) -> Result<Url, GitHubError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url =
            Url::parse(&self.api_url).map_err(|e| GitHubError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| GitHubError::InvalidUrl(self.api_url.clone()))?;
            segments.pop_if_empty();
            segments.extend(["repos", repo.owner.as_str(), repo.name.as_str()]);
            segments.extend(tail);
        }
        Ok(url)
    }

    fn get(&self, url: Url, accept: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .header("Accept", accept)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }
}

/// 把非 2xx 响应转换为错误
async fn error_for_status(response: reqwest::Response, what: &str) -> GitHubError {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GitHubError::Unauthorized {
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => GitHubError::NotFound(what.to_string()),
        _ => GitHubError::Api {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        },
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn repository_exists(&self, repo: &RepositoryIdentity) -> Result<bool, GitHubError> {
        let url = self.repo_url(repo, [])?;
        let response = self.get(url, "application/vnd.github+json").send().await?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Repository {} not accessible: status={}", repo, response.status());
                Ok(false)
            }
            _ => Err(error_for_status(response, &repo.to_string()).await),
        }
    }

    async fn list_tree(&self, repo: &RepositoryIdentity) -> Result<Vec<TreeEntry>, GitHubError> {
        let mut url = self.repo_url(repo, ["git", "trees", "HEAD"])?;
        url.query_pairs_mut().append_pair("recursive", "1");

        let response = self.get(url, "application/vnd.github+json").send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response, &format!("{} tree", repo)).await);
        }

        let body = response.text().await?;
        let tree: TreeResponse = serde_json::from_str(&body)?;
        if tree.truncated {
            warn!("Tree listing for {} was truncated by GitHub", repo);
        }
        debug!("Tree listing for {}: {} entries", repo, tree.tree.len());
        Ok(tree.tree)
    }

    async fn fetch_raw(
        &self,
        repo: &RepositoryIdentity,
        path: &str,
    ) -> Result<String, GitHubError> {
        let tail = std::iter::once("contents").chain(path.split('/').filter(|s| !s.is_empty()));
        let url = self.repo_url(repo, tail)?;

        let response = self.get(url, "application/vnd.github.raw").send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response, path).await);
        }

        if let Some(size) = response.content_length() {
            if size > MAX_CONTENT_BYTES {
                return Err(GitHubError::TooLarge {
                    path: path.to_string(),
                    size,
                });
            }
        }

        let bytes = response.bytes().await?;
        decode_text(path, bytes.to_vec())
    }
}

/// 校验大小并解码为 UTF-8 文本
fn decode_text(path: &str, bytes: Vec<u8>) -> Result<String, GitHubError> {
    let size = bytes.len() as u64;
    if size > MAX_CONTENT_BYTES {
        return Err(GitHubError::TooLarge {
            path: path.to_string(),
            size,
        });
    }
    String::from_utf8(bytes).map_err(|_| GitHubError::NotText(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        GitHubClient::new("https://api.github.com/", None, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_repo_url() {
        let repo = RepositoryIdentity::new("owner", "repo");
        let url = client().repo_url(&repo, []).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/owner/repo");
    }

    #[test]
    fn test_repo_url_escapes_path_segments() {
        let repo = RepositoryIdentity::new("owner", "repo");
        let url = client()
            .repo_url(&repo, ["contents", "docs", "my file#1.md"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/owner/repo/contents/docs/my%20file%231.md"
        );
    }

    #[test]
    fn test_repo_url_with_base_path() {
        let ghe = GitHubClient::new(
            "https://ghe.example.com/api/v3",
            Some("token".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        let repo = RepositoryIdentity::new("o", "r");
        let url = ghe.repo_url(&repo, ["git", "trees", "HEAD"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/o/r/git/trees/HEAD"
        );
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text("a.txt", b"hello".to_vec()).unwrap(), "hello");
        assert!(matches!(
            decode_text("logo.png", vec![0x89, 0x50, 0xff, 0xfe]),
            Err(GitHubError::NotText(_))
        ));
        assert!(matches!(
            decode_text("big.txt", vec![b'a'; MAX_CONTENT_BYTES as usize + 1]),
            Err(GitHubError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_tree_response_defaults() {
        let tree: TreeResponse = serde_json::from_str(r#"{"sha":"abc"}"#).unwrap();
        assert!(tree.tree.is_empty());
        assert!(!tree.truncated);
    }

    /// 在本地端口上启动一个模拟 GitHub 的服务，返回其地址
    async fn serve_stub() -> String {
        use axum::extract::Path;
        use axum::http::StatusCode as HttpStatus;
        use axum::routing::get;
        use axum::Router;

        let router = Router::new()
            .route(
                "/repos/:owner/:repo",
                get(|Path((_, repo)): Path<(String, String)>| async move {
                    match repo.as_str() {
                        "public" => (HttpStatus::OK, "{}"),
                        "missing" => (HttpStatus::NOT_FOUND, "Not Found"),
                        "private" => (HttpStatus::FORBIDDEN, "Forbidden"),
                        "secret" => (HttpStatus::UNAUTHORIZED, "Bad credentials"),
                        _ => (HttpStatus::INTERNAL_SERVER_ERROR, "oops"),
                    }
                }),
            )
            .route(
                "/repos/:owner/:repo/contents/*path",
                get(|| async { (HttpStatus::UNAUTHORIZED, "Bad credentials") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_repository_exists_status_mapping() {
        let base = serve_stub().await;
        let github = GitHubClient::new(base, None, Duration::from_secs(5)).unwrap();
        let repo = |name: &str| RepositoryIdentity::new("owner", name);

        assert!(github.repository_exists(&repo("public")).await.unwrap());
        assert!(!github.repository_exists(&repo("missing")).await.unwrap());
        assert!(!github.repository_exists(&repo("private")).await.unwrap());
        assert!(!github.repository_exists(&repo("secret")).await.unwrap());
        assert!(matches!(
            github.repository_exists(&repo("broken")).await,
            Err(GitHubError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_raw_unauthorized_is_distinguishable() {
        let base = serve_stub().await;
        let github = GitHubClient::new(base, None, Duration::from_secs(5)).unwrap();
        let repo = RepositoryIdentity::new("owner", "public");

        let err = github.fetch_raw(&repo, "src/main.rs").await.unwrap_err();
        assert!(matches!(err, GitHubError::Unauthorized { status: 401 }));
    }
}
