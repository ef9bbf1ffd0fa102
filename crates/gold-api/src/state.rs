//! 애플리케이션 공유 상태.
//!
//! 모든 핸들러가 `Arc<AppState>`로 공유합니다.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use gold_data::HistoricalLoader;

use crate::services::{PriceCache, RefreshService};

/// 애플리케이션 상태.
pub struct AppState {
    /// 시세 갱신 서비스 (캐시 소유)
    pub refresh: Arc<RefreshService>,
    /// 과거 시세 로더
    pub history: Arc<HistoricalLoader>,
    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
    /// 애플리케이션 버전
    pub version: String,
}

impl AppState {
    pub fn new(refresh: Arc<RefreshService>, history: Arc<HistoricalLoader>) -> Self {
        Self {
            refresh,
            history,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 공유 시세 캐시.
    pub fn cache(&self) -> &PriceCache {
        self.refresh.cache()
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}
