//! 시세/추세 제공자 추상화.
//!
//! 갱신 서비스는 이 trait에만 의존하므로 테스트에서 스텁으로 교체할 수 있습니다.

use async_trait::async_trait;

use super::PriceRecord;
use crate::error::GoldResult;

/// 실시간 시세 제공자.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// 시세 페이지를 가져와 레코드로 변환합니다.
    ///
    /// 반환되는 레코드의 `trend`는 항상 `None`입니다.
    ///
    /// # Errors
    ///
    /// - `GoldError::Fetch`: 연결 실패, 타임아웃, 2xx 이외 상태 코드
    /// - `GoldError::Parse`: 페이지 구조 파싱 실패
    async fn fetch_quote(&self) -> GoldResult<PriceRecord>;
}

/// 국제 금값 추세 제공자.
///
/// 실패는 호출자가 고정 문구로 대체하므로 최선 노력(best-effort)으로 동작합니다.
#[async_trait]
pub trait TrendProvider: Send + Sync {
    /// 한 줄 추세 요약을 반환합니다.
    async fn fetch(&self) -> GoldResult<String>;
}
