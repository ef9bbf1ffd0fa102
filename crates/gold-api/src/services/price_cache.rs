//! 최신 시세 스냅샷 캐시.
//!
//! 레코드 전체를 `Arc`로 교체하므로 읽는 쪽은 항상 완성된 레코드만 봅니다.

use std::sync::Arc;
use tokio::sync::RwLock;

use gold_core::PriceRecord;

/// 공유 시세 캐시.
///
/// 복제 비용이 낮아 핸들러와 갱신 서비스가 각자 소유합니다.
#[derive(Debug, Clone, Default)]
pub struct PriceCache {
    inner: Arc<RwLock<Arc<PriceRecord>>>,
}

impl PriceCache {
    /// 빈 캐시 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 스냅샷.
    pub async fn snapshot(&self) -> Arc<PriceRecord> {
        Arc::clone(&*self.inner.read().await)
    }

    /// 레코드를 통째로 교체하고 새 스냅샷을 반환합니다.
    pub async fn replace(&self, record: PriceRecord) -> Arc<PriceRecord> {
        let record = Arc::new(record);
        *self.inner.write().await = Arc::clone(&record);
        record
    }

    /// 한 번이라도 시세가 채워졌는지 여부.
    pub async fn is_populated(&self) -> bool {
        self.snapshot().await.has_any_price()
    }
}
