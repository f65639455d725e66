//! AutoDoc 输出规整
//!
//! 去掉 emoji，并把文档重排为固定的七个章节：每个章节标题恰好出现一次且顺序固定。

use std::borrow::Cow;

use super::prompts::AUTODOC_SECTIONS;
use crate::utils::strip_emoji;

/// 缺失章节的占位内容
const MISSING_SECTION_PLACEHOLDER: &str = "_This section could not be generated._";

/// 解析 markdown 标题，返回级别与标题文本
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    // 缩进四个空格以上是代码块
    if line.len() - line.trim_start_matches(' ').len() >= 4 {
        return None;
    }
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level, rest.trim()))
}

/// 识别 AutoDoc 章节标题，返回章节下标
///
/// 接受 1-3 级标题，忽略大小写、序号前缀（"1. "）与末尾冒号
fn match_section_heading(line: &str) -> Option<usize> {
    let (level, title) = parse_heading(line)?;
    if level > 3 {
        return None;
    }

    let title = title
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches('.')
        .trim()
        .trim_end_matches(':')
        .trim()
        .trim_matches('*')
        .trim();

    AUTODOC_SECTIONS
        .iter()
        .position(|section| section.eq_ignore_ascii_case(title))
}

/// 把不高于 `max_level` 级的标题降为三级标题，其余行原样返回
fn demote_heading(line: &str, max_level: usize) -> Cow<'_, str> {
    match parse_heading(line) {
        Some((level, title)) if level <= max_level && !title.is_empty() => {
            Cow::Owned(format!("### {}", title))
        }
        _ => Cow::Borrowed(line),
    }
}

/// 规整 AutoDoc 文档
///
/// 前言中的二级标题与章节内部的一、二级标题都会降为三级，
/// 保证输出中只有七个固定章节是二级标题
pub fn normalize_autodoc(markdown: &str) -> String {
    let cleaned = strip_emoji(markdown);

    let mut preamble: Vec<Cow<'_, str>> = Vec::new();
    let mut bodies: Vec<Option<Vec<Cow<'_, str>>>> = vec![None; AUTODOC_SECTIONS.len()];
    let mut current: Option<usize> = None;
    let mut in_code_block = false;

    for line in cleaned.lines() {
        let is_fence = line.trim_start().starts_with("```");
        if is_fence {
            in_code_block = !in_code_block;
        }

        if in_code_block || is_fence {
            match current {
                Some(idx) => bodies[idx].get_or_insert_with(Vec::new).push(Cow::Borrowed(line)),
                None => preamble.push(Cow::Borrowed(line)),
            }
            continue;
        }

        if let Some(idx) = match_section_heading(line) {
            current = Some(idx);
            // 重复出现的章节合并到同一个位置
            bodies[idx].get_or_insert_with(Vec::new);
            continue;
        }

        match current {
            Some(idx) => bodies[idx]
                .get_or_insert_with(Vec::new)
                .push(demote_heading(line, 2)),
            None => {
                // 一级标题保留为文档标题
                let demoted = match parse_heading(line) {
                    Some((1, _)) => Cow::Borrowed(line),
                    _ => demote_heading(line, 2),
                };
                preamble.push(demoted);
            }
        }
    }

    let mut output = String::new();
    let preamble = preamble.join("\n");
    let preamble = preamble.trim();
    if !preamble.is_empty() {
        output.push_str(preamble);
        output.push_str("\n\n");
    }

    for (title, body) in AUTODOC_SECTIONS.iter().zip(bodies) {
        let body = body.map(|lines| lines.join("\n")).unwrap_or_default();
        let body = body.trim();
        output.push_str("## ");
        output.push_str(title);
        output.push_str("\n\n");
        output.push_str(if body.is_empty() {
            MISSING_SECTION_PLACEHOLDER
        } else {
            body
        });
        output.push_str("\n\n");
    }

    output.trim_end().to_string() + "\n"
}

/// 生成失败时的兜底文档
pub fn fallback_autodoc() -> String {
    normalize_autodoc("# Unable to generate documentation\n\nDocumentation generation failed.")
}
