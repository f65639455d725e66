//! 服务层模块

pub(crate) mod llm_service;
pub mod readme_generator;

pub use llm_service::LlmService;
