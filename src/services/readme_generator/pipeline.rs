//! README 生成流水线
//!
//! 每个请求依次经过：解析地址 → 校验仓库存在 → 拉取内容 → 定位/分析 README → 生成。
//! 任何一步失败即终止本次请求，不做自动重试。

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::analyzer::{detect_missing_sections, find_readme};
use super::generator::ReadmeGenerator;
use super::templates::assemble_readme;
use super::types::{ProcessedRepository, Section, SourceFile};
use crate::github::{parse_github_url, FetchError, GitHubError, RepoFetcher, RepoHost};
use crate::llm::LlmError;
use crate::services::LlmService;

/// 流水线错误
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 无法解析的仓库地址
    #[error("无效的 GitHub 地址: {0}")]
    InvalidUrl(String),

    /// 输入文件列表不合法
    #[error("{0}")]
    InvalidInput(String),

    /// 仓库不存在或无权访问
    #[error("仓库不存在或无权访问: {0}")]
    NotFound(String),

    /// 仓库中没有可用的文件
    #[error("仓库中没有可用的文件: {0}")]
    NoFiles(String),

    /// 存在性校验失败
    #[error("校验仓库失败: {0}")]
    ExistenceCheck(#[source] GitHubError),

    /// 拉取失败
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// 生成失败
    #[error("生成失败: {0}")]
    Generation(#[from] LlmError),
}

/// README 生成流水线
pub struct ReadmePipeline {
    host: Arc<dyn RepoHost>,
    fetcher: RepoFetcher,
    generator: ReadmeGenerator,
}

impl ReadmePipeline {
    pub fn new(host: Arc<dyn RepoHost>, fetcher: RepoFetcher, llm: LlmService) -> Self {
        Self {
            host,
            fetcher,
            generator: ReadmeGenerator::new(llm),
        }
    }

    /// 生成所用的模型名称
    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// 处理一个仓库地址
    pub async fn process_repository(
        &self,
        url: &str,
    ) -> Result<ProcessedRepository, PipelineError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("process_repo", request_id = %request_id);
        self.run_repository(url).instrument(span).await
    }

    async fn run_repository(&self, url: &str) -> Result<ProcessedRepository, PipelineError> {
        let repo =
            parse_github_url(url).ok_or_else(|| PipelineError::InvalidUrl(url.to_string()))?;
        info!("Processing repository {}", repo);

        let exists = self
            .host
            .repository_exists(&repo)
            .await
            .map_err(PipelineError::ExistenceCheck)?;
        if !exists {
            return Err(PipelineError::NotFound(repo.to_string()));
        }

        let outcome = self.fetcher.fetch(self.host.as_ref(), &repo).await?;
        if outcome.files.is_empty() {
            return Err(PipelineError::NoFiles(repo.to_string()));
        }
        let files = outcome.files;

        let result = match find_readme(&files) {
            Some(readme) => {
                let body = readme.content.clone().unwrap_or_default();
                info!("Found existing README at {}", readme.path);

                let missing_sections = detect_missing_sections(&body, &files);
                let generated_readme = if missing_sections.is_empty() {
                    info!("README already covers every standard section");
                    body.clone()
                } else {
                    info!("README is missing sections: {:?}", missing_sections);
                    let backfill = self.generator.generate_sections(&body, &missing_sections).await?;
                    append_backfill(&body, &backfill)
                };

                ProcessedRepository {
                    repository: repo.to_string(),
                    summary: body.clone(),
                    existing_readme: Some(body),
                    missing_sections,
                    generated_readme,
                    omitted_files: outcome.omitted,
                }
            }
            None => {
                info!("No README found, generating a complete one");
                let sources = SourceFile::from_repo_files(&files);
                let summary = self.generator.summarize_project(&sources).await?;

                let missing_sections = Section::CANONICAL_MISSING.to_vec();
                let requested: Vec<&str> = missing_sections.iter().map(Section::as_str).collect();
                let generated_readme =
                    assemble_readme(&repo.name, &summary, &requested, &HashMap::new());

                ProcessedRepository {
                    repository: repo.to_string(),
                    summary,
                    existing_readme: None,
                    missing_sections,
                    generated_readme,
                    omitted_files: outcome.omitted,
                }
            }
        };

        info!("Finished processing {}", repo);
        Ok(result)
    }

    /// 根据给定的文件列表生成 AutoDoc 文档
    pub async fn generate_from_files(&self, files: &[SourceFile]) -> Result<String, PipelineError> {
        validate_files(files)?;

        let request_id = Uuid::new_v4();
        let span = info_span!("generate_docs", request_id = %request_id);
        async {
            info!("Generating AutoDoc documentation from {} files", files.len());
            let readme = self.generator.generate_autodoc(files).await?;
            info!("AutoDoc documentation generated ({} chars)", readme.len());
            Ok::<_, PipelineError>(readme)
        }
        .instrument(span)
        .await
    }
}

/// 校验输入文件：列表非空，且每个文件的路径与内容都非空
fn validate_files(files: &[SourceFile]) -> Result<(), PipelineError> {
    if files.is_empty() {
        return Err(PipelineError::InvalidInput(
            "Repository source files are required".to_string(),
        ));
    }
    if files
        .iter()
        .any(|file| file.path.is_empty() || file.content.is_empty())
    {
        return Err(PipelineError::InvalidInput(
            "Each file must have \"path\" and \"content\" properties".to_string(),
        ));
    }
    Ok(())
}

/// 把补写内容追加到已有 README 之后
fn append_backfill(existing: &str, backfill: &str) -> String {
    if backfill.trim().is_empty() {
        return existing.to_string();
    }
    format!("{}\n\n{}\n", existing.trim_end(), backfill.trim())
}
