//! GitHub 相关类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 仓库标识（owner/name）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub name: String,
}

impl RepositoryIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Git 树条目（`GET /git/trees` 返回的元素）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// blob / tree / commit
    #[serde(rename = "type")]
    pub entry_type: String,
    /// 文件大小（仅 blob 有值）
    #[serde(default)]
    pub size: Option<u64>,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.entry_type == "blob"
    }
}

/// 文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    File,
    Dir,
}

/// 拉取到的仓库文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoFile {
    /// 文件名（路径最后一段）
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// 仓库内相对路径
    pub path: String,
    /// 文件内容（仅成功拉取且大小合规的文件有值）
    pub content: Option<String>,
}

impl RepoFile {
    /// 由路径和内容构建文件条目
    pub fn file(path: impl Into<String>, content: Option<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self {
            name,
            kind: FileKind::File,
            path,
            content,
        }
    }
}
