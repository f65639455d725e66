//! 已有文档分析
//!
//! 定位仓库中的 README，并用固定的标记表判断标准章节是否存在。

use crate::github::RepoFile;

use super::types::Section;

/// 章节标记表：正文（小写后）包含任一标记即视为该章节已存在
pub const SECTION_MARKERS: [(Section, &[&str]); 6] = [
    (Section::Installation, &["# install", "## instal", "getting started"]),
    (Section::Usage, &["# usage", "## us", "how to use"]),
    (Section::Features, &["# feature", "## feature"]),
    (Section::Contributing, &["# contribut", "## contribut"]),
    (Section::License, &["# licens", "## licens"]),
    (Section::Acknowledgements, &["# acknowledg", "# thank"]),
];

/// 各章节的存在情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStatus {
    present: [bool; 6],
}

impl SectionStatus {
    /// 对正文评估全部章节
    pub fn evaluate(body: &str) -> Self {
        let content = body.to_lowercase();
        let mut present = [false; 6];
        for (slot, (_, markers)) in present.iter_mut().zip(SECTION_MARKERS.iter()) {
            *slot = markers.iter().any(|marker| content.contains(marker));
        }
        Self { present }
    }

    #[cfg(test)]
    pub fn is_present(&self, section: Section) -> bool {
        SECTION_MARKERS
            .iter()
            .position(|(s, _)| *s == section)
            .map(|idx| self.present[idx])
            .unwrap_or(false)
    }

    /// 缺失的章节（固定顺序）
    pub fn missing(&self) -> Vec<Section> {
        SECTION_MARKERS
            .iter()
            .zip(self.present.iter())
            .filter(|(_, present)| !**present)
            .map(|((section, _), _)| *section)
            .collect()
    }
}

/// 检测 README 正文缺失的章节
///
/// 文件列表目前不参与判断，只有正文决定结果
pub fn detect_missing_sections(existing_readme: &str, _files: &[RepoFile]) -> Vec<Section> {
    SectionStatus::evaluate(existing_readme).missing()
}

/// 查找已有的 README
///
/// 候选：路径包含 "readme"、以 ".md" 结尾且有内容（均大小写不敏感）。
/// 优先选择路径恰为 "readme.md" 的文件，否则取第一个候选。
pub fn find_readme(files: &[RepoFile]) -> Option<&RepoFile> {
    let mut candidates = files.iter().filter(|file| {
        let path = file.path.to_lowercase();
        path.contains("readme") && path.ends_with(".md") && file.content.is_some()
    });

    let first = candidates.next()?;
    if first.path.eq_ignore_ascii_case("readme.md") {
        return Some(first);
    }

    candidates
        .find(|file| file.path.eq_ignore_ascii_case("readme.md"))
        .or(Some(first))
}
