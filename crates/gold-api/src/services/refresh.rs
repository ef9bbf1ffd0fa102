//! 시세 갱신 오케스트레이터.
//!
//! 은행 시세 수집 → 국제 금값 추세 → 캐시 교체 순서로 진행하며,
//! 어떤 단계의 실패도 호출자에게 전파하지 않습니다.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use gold_core::{PriceRecord, QuoteProvider, TrendProvider, TREND_FAILED};
use gold_notification::NotificationManager;

use super::price_cache::PriceCache;

/// 시세 갱신 및 알림 서비스.
pub struct RefreshService {
    quotes: Arc<dyn QuoteProvider>,
    trend: Arc<dyn TrendProvider>,
    cache: PriceCache,
    notifier: Arc<NotificationManager>,
}

impl RefreshService {
    pub fn new(
        quotes: Arc<dyn QuoteProvider>,
        trend: Arc<dyn TrendProvider>,
        cache: PriceCache,
        notifier: Arc<NotificationManager>,
    ) -> Self {
        Self {
            quotes,
            trend,
            cache,
            notifier,
        }
    }

    /// 공유 캐시.
    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// 시세를 새로 가져와 캐시를 교체합니다.
    ///
    /// 수집에 실패하거나 가격 항목이 하나도 없으면 캐시를 건드리지 않고 `None`을 반환합니다.
    /// 추세 분석 실패는 고정 문구로 대체됩니다.
    pub async fn update_price_cache(&self) -> Option<Arc<PriceRecord>> {
        let quote = match self.quotes.fetch_quote().await {
            Ok(quote) => quote,
            Err(e) => {
                error!(error = %e, "시세 수집 실패, 기존 캐시 유지");
                return None;
            }
        };

        if !quote.has_any_price() {
            warn!(timestamp = ?quote.timestamp, "시세 항목 없음, 캐시를 덮어쓰지 않음");
            return None;
        }

        let trend = match self.trend.fetch().await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "국제 금값 추세 분석 실패");
                TREND_FAILED.to_string()
            }
        };

        let record = self.cache.replace(quote.with_trend(trend)).await;
        info!(timestamp = ?record.timestamp, "시세 캐시 갱신 완료");
        Some(record)
    }

    /// 시세를 갱신하고 알림을 보냅니다.
    ///
    /// 갱신에 실패하면 게시 시각이 있는 캐시 레코드로 대신 알리고,
    /// 캐시가 비어 있으면 아무것도 보내지 않습니다.
    pub async fn job_daily_notify(&self) {
        if let Some(record) = self.update_price_cache().await {
            self.notifier.notify_price(&record).await;
            return;
        }

        let cached = self.cache.snapshot().await;
        if cached.has_timestamp() {
            warn!(timestamp = ?cached.timestamp, "갱신 실패, 캐시된 시세로 알림");
            self.notifier.notify_price(&cached).await;
        } else {
            debug!("갱신 실패, 캐시도 비어 있어 알림 생략");
        }
    }
}
