//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 컨테이너 오케스트레이터에서 사용합니다.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 상태 ("healthy" | "warming_up")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 시세 캐시가 한 번이라도 채워졌는지
    pub cache_populated: bool,

    /// 캐시된 시세의 게시 시각
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_timestamp: Option<String>,
}

/// Liveness 체크.
///
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness 체크.
///
/// GET /health/ready
///
/// 업스트림 수집 실패는 준비 상태에 영향을 주지 않으므로 항상 200입니다.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.cache().snapshot().await;
    let cache_populated = snapshot.has_any_price();

    Json(HealthResponse {
        status: if cache_populated { "healthy" } else { "warming_up" }.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        cache_populated,
        quote_timestamp: snapshot.timestamp.clone(),
    })
}

pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}
