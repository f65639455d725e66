//! 应用状态管理
//!
//! 定义在请求处理器之间共享的状态。

use std::sync::Arc;

use crate::services::readme_generator::ReadmePipeline;

/// 应用共享状态
///
/// 进程启动时构建，之后只读；使用 Arc 包裹以便在多个处理器之间共享
pub struct AppState {
    /// README 生成流水线
    pub pipeline: ReadmePipeline,
}

/// 创建可共享的应用状态
pub fn create_shared_state(pipeline: ReadmePipeline) -> Arc<AppState> {
    Arc::new(AppState { pipeline })
}
