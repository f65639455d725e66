//! 仓库内容拉取器
//!
//! 列出文件树 → 过滤 blob 并按大小准入 → 截取前 N 个 → 分批并发拉取原始内容。
//! 批与批之间串行，批内并发；结果顺序与文件树顺序一致。

use futures::future::join_all;
use std::time::Duration;
use tracing::{info, warn};

use super::client::{GitHubError, RepoHost, MAX_CONTENT_BYTES};
use super::types::{RepoFile, RepositoryIdentity, TreeEntry};

/// 拉取限制
#[derive(Debug, Clone)]
pub struct FetchLimits {
    /// 准入阈值（字节）
    pub max_file_size: u64,
    /// 最多拉取的文件数
    pub max_files: usize,
    /// 每批并发请求数
    pub batch_size: usize,
    /// 单个文件的截止时间
    pub file_timeout: Duration,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_file_size: MAX_CONTENT_BYTES,
            max_files: 50,
            batch_size: 5,
            file_timeout: Duration::from_secs(30),
        }
    }
}

/// 拉取结果
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// 成功拉取的文件（保持文件树顺序）
    pub files: Vec<RepoFile>,
    /// 已准入但拉取失败而被丢弃的文件数
    pub omitted: usize,
}

/// 拉取错误
///
/// 单个文件失败不会出现在这里，只有列树失败才会中止整个拉取
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("获取仓库文件树失败: {0}")]
    ListingFailed(#[source] GitHubError),
}

/// 仓库内容拉取器
#[derive(Debug, Clone, Default)]
pub struct RepoFetcher {
    limits: FetchLimits,
}

impl RepoFetcher {
    pub fn new(limits: FetchLimits) -> Self {
        Self { limits }
    }

    /// 选出需要拉取的条目
    ///
    /// 只保留 blob，跳过声明大小超过阈值的条目，再按服务端顺序截取前 `max_files` 个
    pub fn admit<'a>(&self, tree: &'a [TreeEntry]) -> Vec<&'a TreeEntry> {
        tree.iter()
            .filter(|entry| entry.is_blob())
            .filter(|entry| entry.size.map_or(true, |size| size <= self.limits.max_file_size))
            .take(self.limits.max_files)
            .collect()
    }

    /// 拉取仓库内容
    pub async fn fetch(
        &self,
        host: &dyn RepoHost,
        repo: &RepositoryIdentity,
    ) -> Result<FetchOutcome, FetchError> {
        let tree = host
            .list_tree(repo)
            .await
            .map_err(FetchError::ListingFailed)?;

        let admitted = self.admit(&tree);
        info!(
            "Fetching {} of {} tree entries from {}",
            admitted.len(),
            tree.len(),
            repo
        );

        let mut outcome = FetchOutcome::default();
        for batch in admitted.chunks(self.limits.batch_size.max(1)) {
            let results = join_all(batch.iter().map(|entry| self.fetch_one(host, repo, entry))).await;
            for result in results {
                match result {
                    Some(file) => outcome.files.push(file),
                    None => outcome.omitted += 1,
                }
            }
        }

        if outcome.omitted > 0 {
            warn!(
                "Fetched {} files from {}, {} omitted after individual failures",
                outcome.files.len(),
                repo,
                outcome.omitted
            );
        } else {
            info!("Fetched {} files from {}", outcome.files.len(), repo);
        }

        Ok(outcome)
    }

    /// 拉取单个文件，任何失败都只记录日志并返回 None
    async fn fetch_one(
        &self,
        host: &dyn RepoHost,
        repo: &RepositoryIdentity,
        entry: &TreeEntry,
    ) -> Option<RepoFile> {
        let result = tokio::time::timeout(self.limits.file_timeout, host.fetch_raw(repo, &entry.path))
            .await
            .unwrap_or_else(|_| Err(GitHubError::Timeout(entry.path.clone())));

        match result {
            Ok(content) if content.len() as u64 > self.limits.max_file_size => {
                warn!("Failed to fetch {}: response exceeds size limit", entry.path);
                None
            }
            Ok(content) => Some(RepoFile::file(entry.path.clone(), Some(content))),
            Err(e) => {
                warn!("Failed to fetch {}: {}", entry.path, e);
                None
            }
        }
    }
}
