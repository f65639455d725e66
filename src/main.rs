//! AutoDoc - README 生成后端
//!
//! 使用 axum 框架构建的后端服务：拉取 GitHub 仓库内容，分析已有 README，
//! 并调用 LLM 补写缺失章节或生成完整文档。

use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod github;
mod llm;
mod services;
mod state;
mod utils;

use api::create_api_routes;
use config::get_config;
use github::{FetchLimits, GitHubClient, RepoFetcher};
use llm::{CredentialChain, LlmClient};
use services::readme_generator::ReadmePipeline;
use services::LlmService;
use state::create_shared_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autodoc_backend=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AutoDoc backend...");

    let config = get_config();

    // 凭据链为空时拒绝启动
    let credentials =
        CredentialChain::from_config(config).context("no usable LLM API key configured")?;
    info!(
        "LLM: base_url={}, model={}, credentials={:?}",
        config.base_url, config.model, credentials
    );

    let llm_client = LlmClient::new(
        config.base_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    let llm_service = LlmService::new(Arc::new(llm_client), credentials, config.model.clone());

    let github = GitHubClient::new(
        config.github_api_url.clone(),
        config.github_token(),
        Duration::from_secs(config.github_timeout_secs),
    )?;
    let fetcher = RepoFetcher::new(FetchLimits {
        file_timeout: Duration::from_secs(config.file_fetch_timeout_secs),
        ..FetchLimits::default()
    });

    // 创建共享状态
    let state = create_shared_state(ReadmePipeline::new(Arc::new(github), fetcher, llm_service));

    // 配置 CORS（允许所有来源）
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 构建路由
    let app = Router::new()
        .merge(create_api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.bind_addr))?;
    info!("Server listening on: {}", addr);

    // 启动服务器
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
