//! GitHub 模块
//!
//! 解析仓库地址、调用 GitHub REST API，并以有界并发批量拉取仓库文件内容。

mod client;
mod fetcher;
mod types;
mod url;

pub use client::{GitHubClient, GitHubError, RepoHost};
pub use fetcher::{FetchError, FetchLimits, RepoFetcher};
pub use types::RepoFile;
#[cfg(test)]
pub use types::{RepositoryIdentity, TreeEntry};
pub use url::parse_github_url;
