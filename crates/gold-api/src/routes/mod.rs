//! REST API 라우트.
//!
//! - `/` - 대시보드 페이지
//! - `/health` - 헬스 체크
//! - `/api/gold` - 현재 시세
//! - `/api/history` - 최근 1년 시세

pub mod gold;
pub mod health;
pub mod history;
pub mod index;

use axum::Router;
use std::sync::Arc;

use crate::error::not_found;
use crate::state::AppState;

pub use gold::{get_gold, gold_router, GoldQuery};
pub use health::{health_check, health_ready, health_router, HealthResponse};
pub use history::{get_history, history_router};
pub use index::index_router;

/// API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(index_router())
        .nest("/health", health_router())
        .nest("/api/gold", gold_router())
        .nest("/api/history", history_router())
        .fallback(not_found)
}
