//! README 生成器类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::github::RepoFile;

/// 带内容的源文件（prompt 的输入单位）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// 从拉取结果转换，没有内容的文件被丢弃
    pub fn from_repo_files(files: &[RepoFile]) -> Vec<SourceFile> {
        files
            .iter()
            .filter_map(|f| f.content.as_ref().map(|c| SourceFile::new(&f.path, c)))
            .collect()
    }
}

/// 标准 README 章节
///
/// 声明顺序即检测结果与模板拼装使用的固定顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    Installation,
    Usage,
    Features,
    Contributing,
    License,
    Acknowledgements,
}

impl Section {
    /// 全部章节（固定顺序）
    pub const ALL: [Section; 6] = [
        Section::Installation,
        Section::Usage,
        Section::Features,
        Section::Contributing,
        Section::License,
        Section::Acknowledgements,
    ];

    /// 新建 README 时必定包含的章节
    pub const CANONICAL_MISSING: [Section; 3] =
        [Section::Installation, Section::Usage, Section::License];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Installation => "Installation",
            Section::Usage => "Usage",
            Section::Features => "Features",
            Section::Contributing => "Contributing",
            Section::License => "License",
            Section::Acknowledgements => "Acknowledgements",
        }
    }

    /// 按名称查找（大小写不敏感）
    pub fn from_name(name: &str) -> Option<Section> {
        let name = name.trim();
        Section::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 仓库处理结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRepository {
    /// "owner/name"
    pub repository: String,
    /// 项目摘要（已有 README 时为其原文）
    pub summary: String,
    /// 已有 README 原文
    pub existing_readme: Option<String>,
    /// 缺失的章节
    pub missing_sections: Vec<Section>,
    /// 最终 README
    pub generated_readme: String,
    /// 拉取失败被丢弃的文件数
    pub omitted_files: usize,
}
