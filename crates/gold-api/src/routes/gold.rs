//! 현재 시세 endpoint.
//!
//! `GET /api/gold` 는 캐시된 레코드를 그대로 반환합니다.
//! `refresh=true` 이면 먼저 동기 갱신을 시도하고, 실패해도 기존 캐시로 200을 응답합니다.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use gold_core::PriceRecord;

use crate::state::AppState;

/// 쿼리 파라미터.
#[derive(Debug, Default, Deserialize)]
pub struct GoldQuery {
    #[serde(default)]
    pub refresh: Option<String>,
}

impl GoldQuery {
    /// `refresh=true` (대소문자 무시) 여부.
    pub fn wants_refresh(&self) -> bool {
        self.refresh
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }
}

/// 현재 시세 조회.
///
/// GET /api/gold
pub async fn get_gold(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GoldQuery>,
) -> Json<PriceRecord> {
    if query.wants_refresh() {
        info!("수동 시세 갱신 요청");
        if let Some(record) = state.refresh.update_price_cache().await {
            return Json(record.as_ref().clone());
        }
    }

    Json(state.cache().snapshot().await.as_ref().clone())
}

pub fn gold_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_gold))
}
