//! 최근 1년 시세 endpoint.

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use gold_core::HistorySeries;

use crate::state::AppState;

/// 과거 시세 조회.
///
/// GET /api/history
///
/// 캐시가 오늘 날짜까지 있으면 그대로, 아니면 은행 페이지에서 새로 가져옵니다.
/// 수집에 실패하면 기존 캐시(없으면 빈 시계열)를 반환합니다.
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<HistorySeries> {
    Json(state.history.get_historical_data().await)
}

pub fn history_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_history))
}
