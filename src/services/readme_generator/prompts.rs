//! LLM Prompt 模板
//!
//! 定义项目摘要、章节补写、AutoDoc 全文生成的 Prompt 模板

use super::types::{Section, SourceFile};
use crate::utils::truncate_chars;

/// 摘要最多使用的文件数
pub const SUMMARY_MAX_FILES: usize = 20;
/// 摘要中每个文件截取的字符数
pub const SUMMARY_MAX_CHARS: usize = 1000;
/// AutoDoc 最多使用的文件数
pub const AUTODOC_MAX_FILES: usize = 30;
/// AutoDoc 中每个文件截取的字符数
pub const AUTODOC_MAX_CHARS: usize = 2000;

/// 项目摘要 Prompt
pub const PROJECT_SUMMARY_PROMPT: &str = r#"
Based on the following files from a GitHub repository, provide a comprehensive summary of the project including:

1. What the project does
2. Main technologies/frameworks used
3. Key components/features
4. Overall architecture/structure

Files:
{file_summaries}

Please provide a concise but detailed summary (200-400 words).
"#;

/// 章节补写 Prompt
pub const SECTION_BACKFILL_PROMPT: &str = r#"
Generate the missing or improved sections for a README based on the project content below.
The project summary is: {content}

Generate the following sections: {sections}

For each section, provide appropriate content that fits a professional README.
Format as markdown with headers.
"#;

/// AutoDoc 全文生成 Prompt
pub const AUTODOC_PROMPT: &str = r#"You are AutoDoc AI, an autonomous documentation agent.

Your goal is to generate documentation that is:
- Clear
- Simple
- Friendly
- Easy to understand for beginners and non-technical readers

Do not use emojis.
Do not use complex words.
Do not assume prior knowledge.

Input:
Source code files from a GitHub repository.

Your tasks:

1. Understand what the project does at a high level.
2. Explain the project in simple language.
3. Structure the README using the following sections only, each as a level-two markdown heading:

{section_list}

4. For each section:
   - Use short paragraphs.
   - Use bullet points where helpful.
   - Explain concepts in plain language.
   - Avoid marketing language.

5. Frontend section:
   - Explain what the frontend does.
   - Mention frameworks and UI behavior simply.

6. Backend section:
   - Explain APIs and logic in simple terms.
   - Avoid implementation complexity.

7. Technologies Used:
   - List tools with one-line explanations.

8. How to Run Locally:
   - Step-by-step instructions.
   - Assume the reader is new.

9. Why This Project Is Useful:
   - Explain real-world value clearly.

Output format:
Return only valid Markdown.

Tone:
Calm, friendly, and educational.
Readable by anyone.

Repository files:
{file_summaries}"#;

/// AutoDoc 文档必须包含的章节（固定顺序）
pub const AUTODOC_SECTIONS: [&str; 7] = [
    "Project Overview",
    "How It Works",
    "Frontend",
    "Backend",
    "Technologies Used",
    "How to Run Locally",
    "Why This Project Is Useful",
];

/// 把文件列表格式化为 prompt 片段
///
/// 只取前 `max_files` 个文件，每个文件截取前 `max_chars` 个字符
pub fn format_file_excerpts(files: &[SourceFile], max_files: usize, max_chars: usize) -> String {
    files
        .iter()
        .take(max_files)
        .map(|file| {
            format!(
                "File: {}\n\n{}...",
                file.path,
                truncate_chars(&file.content, max_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// 格式化项目摘要 Prompt
pub fn format_project_summary_prompt(files: &[SourceFile]) -> String {
    PROJECT_SUMMARY_PROMPT.replace(
        "{file_summaries}",
        &format_file_excerpts(files, SUMMARY_MAX_FILES, SUMMARY_MAX_CHARS),
    )
}

/// 格式化章节补写 Prompt
pub fn format_section_backfill_prompt(content: &str, sections: &[Section]) -> String {
    let sections = sections
        .iter()
        .map(Section::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    // 先替换章节列表，避免正文中出现占位符时被二次替换
    SECTION_BACKFILL_PROMPT
        .replace("{sections}", &sections)
        .replace("{content}", content)
}

/// 格式化 AutoDoc Prompt
pub fn format_autodoc_prompt(files: &[SourceFile]) -> String {
    let section_list = AUTODOC_SECTIONS
        .iter()
        .map(|s| format!("   - {}", s))
        .collect::<Vec<_>>()
        .join("\n");

    AUTODOC_PROMPT
        .replace("{section_list}", &section_list)
        .replace(
            "{file_summaries}",
            &format_file_excerpts(files, AUTODOC_MAX_FILES, AUTODOC_MAX_CHARS),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_excerpts() {
        let files = vec![
            SourceFile::new("a.rs", "fn a() {}"),
            SourceFile::new("b.rs", "fn b() {}"),
        ];
        assert_eq!(
            format_file_excerpts(&files, 10, 100),
            "File: a.rs\n\nfn a() {}...\n\n---\n\nFile: b.rs\n\nfn b() {}..."
        );
    }

    #[test]
    fn test_excerpts_truncate_by_characters() {
        let files = vec![SourceFile::new("i18n.txt", "héllo wörld")];
        assert_eq!(format_file_excerpts(&files, 1, 4), "File: i18n.txt\n\nhéll...");
    }

    #[test]
    fn test_summary_prompt_limits_file_count() {
        let files: Vec<SourceFile> = (0..25)
            .map(|i| SourceFile::new(format!("file{:02}.rs", i), "x"))
            .collect();
        let prompt = format_project_summary_prompt(&files);
        assert!(prompt.contains("File: file19.rs"));
        assert!(!prompt.contains("File: file20.rs"));
        assert!(prompt.contains("200-400 words"));
    }

    #[test]
    fn test_summary_prompt_truncates_content() {
        let long = "a".repeat(1500);
        let prompt = format_project_summary_prompt(&[SourceFile::new("big.rs", long)]);
        assert!(prompt.contains(&format!("{}...", "a".repeat(1000))));
        assert!(!prompt.contains(&"a".repeat(1001)));
    }

    #[test]
    fn test_autodoc_prompt_limits() {
        let files: Vec<SourceFile> = (0..35)
            .map(|i| SourceFile::new(format!("f{:02}.js", i), "b".repeat(2500)))
            .collect();
        let prompt = format_autodoc_prompt(&files);
        assert!(prompt.contains("File: f29.js"));
        assert!(!prompt.contains("File: f30.js"));
        assert!(!prompt.contains(&"b".repeat(2001)));
        for section in AUTODOC_SECTIONS {
            assert!(prompt.contains(&format!("   - {}", section)));
        }
        assert!(prompt.contains("Do not use emojis."));
    }

    #[test]
    fn test_autodoc_template_is_complete() {
        assert!(AUTODOC_PROMPT.contains("each as a level-two markdown heading:"));
        assert!(AUTODOC_PROMPT.contains("{section_list}"));
        assert!(AUTODOC_PROMPT.contains("Readable by anyone."));
        assert!(AUTODOC_PROMPT.ends_with("Repository files:\n{file_summaries}"));
    }

    #[test]
    fn test_backfill_prompt_lists_sections() {
        let prompt =
            format_section_backfill_prompt("An app.", &[Section::Usage, Section::License]);
        assert!(prompt.contains("The project summary is: An app."));
        assert!(prompt.contains("Generate the following sections: Usage, License"));
    }

    #[test]
    fn test_backfill_prompt_keeps_placeholder_text_in_content() {
        let prompt = format_section_backfill_prompt("uses {sections} literally", &[Section::Usage]);
        assert!(prompt.contains("uses {sections} literally"));
    }
}
