//! API 路由模块

mod health;
mod readme;

pub use health::health_routes;
pub use readme::readme_routes;

use axum::Router;

use crate::state::AppState;
use std::sync::Arc;

/// 创建所有 API 路由
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(readme_routes())
        .with_state(state)
}
