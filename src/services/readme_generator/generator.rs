//! README 生成器
//!
//! 负责构建 prompt、调用 LLM 服务，并在输出为空时提供兜底内容

use tracing::{debug, info, warn};

use super::autodoc::{fallback_autodoc, normalize_autodoc};
use super::prompts;
use super::types::{Section, SourceFile};
use crate::llm::{GenerationOptions, LlmError};
use crate::services::LlmService;

/// 摘要生成为空时的兜底文本
pub const SUMMARY_FALLBACK: &str = "Summary could not be generated.";

/// README 生成器
#[derive(Clone)]
pub struct ReadmeGenerator {
    llm: LlmService,
}

impl ReadmeGenerator {
    /// 创建新的生成器
    pub fn new(llm: LlmService) -> Self {
        Self { llm }
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// 生成项目摘要
    pub async fn summarize_project(&self, files: &[SourceFile]) -> Result<String, LlmError> {
        let prompt = prompts::format_project_summary_prompt(files);
        debug!("Summary prompt built from {} files ({} chars)", files.len(), prompt.len());

        let summary = self.llm.generate(prompt, GenerationOptions::new(800)).await?;
        if summary.trim().is_empty() {
            warn!("LLM returned an empty summary, using fallback text");
            return Ok(SUMMARY_FALLBACK.to_string());
        }
        Ok(summary)
    }

    /// 补写缺失章节，返回 markdown（可能为空）
    pub async fn generate_sections(
        &self,
        content: &str,
        sections: &[Section],
    ) -> Result<String, LlmError> {
        if sections.is_empty() {
            return Ok(String::new());
        }

        let prompt = prompts::format_section_backfill_prompt(content, sections);
        let markdown = self.llm.generate(prompt, GenerationOptions::new(1000)).await?;
        info!(
            "Generated {} missing sections ({} chars)",
            sections.len(),
            markdown.len()
        );
        Ok(markdown.trim().to_string())
    }

    /// AutoDoc 全文生成
    ///
    /// 输出经过规整：无 emoji，七个章节按固定顺序各出现一次
    pub async fn generate_autodoc(&self, files: &[SourceFile]) -> Result<String, LlmError> {
        let prompt = prompts::format_autodoc_prompt(files);
        let options = GenerationOptions::new(2000).with_temperature(0.3);

        let markdown = self.llm.generate(prompt, options).await?;
        if markdown.trim().is_empty() {
            warn!("LLM returned empty AutoDoc output, using fallback document");
            return Ok(fallback_autodoc());
        }
        Ok(normalize_autodoc(&markdown))
    }
}
