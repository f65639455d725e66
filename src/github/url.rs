//! 仓库地址解析

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::RepositoryIdentity;

/// 匹配 `github.com/{owner}/{repo}`，仓库名在 `/`、`?`、`#` 或空白处结束
static GITHUB_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"github\.com/([^/?#\s]+)/([^/?#\s]+)").expect("valid github url regex")
});

/// 从任意字符串中提取 (owner, repo)
///
/// 不匹配时返回 None；仓库名末尾的 `.git` 会被去掉。不访问网络。
pub fn parse_github_url(url: &str) -> Option<RepositoryIdentity> {
    let captures = GITHUB_URL_RE.captures(url)?;
    let owner = captures.get(1)?.as_str();
    let repo = captures.get(2)?.as_str();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if repo.is_empty() {
        return None;
    }

    Some(RepositoryIdentity::new(owner, repo))
}
