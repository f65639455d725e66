//! README 生成器模块
//!
//! 结合对已有文档的确定性分析与 LLM 生成内容，为仓库产出 README。
//!
//! # 功能
//!
//! - 定位仓库中已有的 README，并检测缺失的标准章节
//! - 生成项目摘要、补写缺失章节、AutoDoc 全文生成
//! - 无 README 时按模板确定性地拼装完整文档
//! - 编排：解析地址 → 校验存在 → 拉取内容 → 分析 → 生成
//!
//! # 使用示例
//!
//! ```ignore
//! let pipeline = ReadmePipeline::new(host, RepoFetcher::default(), llm_service);
//!
//! let result = pipeline.process_repository("https://github.com/owner/repo").await?;
//! println!("{}", result.generated_readme);
//! ```

mod analyzer;
mod autodoc;
mod generator;
mod pipeline;
pub mod prompts;
mod templates;
mod types;

pub use pipeline::{PipelineError, ReadmePipeline};
pub use types::{ProcessedRepository, SourceFile};
