//! 시세 레코드.
//!
//! 은행 페이지에서 긁어온 값을 구분 기호("5,300")까지 포함한 원문 그대로 보관합니다.
//! 값이 없으면 0이 아니라 `None`이며, JSON에서는 `null`로 직렬화됩니다.

use serde::{Deserialize, Serialize};

/// 값이 없음을 나타내는 표시 문자열.
pub const NOT_AVAILABLE: &str = "N/A";

/// 추세 분석 실패 시 레코드에 저장되는 문구.
pub const TREND_FAILED: &str = "國際行情分析失敗";

/// 레코드에 추세 문구가 없을 때 메시지에 출력되는 문구.
pub const TREND_MISSING: &str = "國際金價資料暫時無法取得。";

/// 매수/매도 호가 쌍 (은행 기준).
///
/// - `buy`: 은행이 사들이는 가격 (고객 입장에서 회수가)
/// - `sell`: 은행이 파는 가격 (고객 입장에서 매입가)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePair {
    pub buy: Option<String>,
    pub sell: Option<String>,
}

impl QuotePair {
    /// 새 호가 쌍 생성
    pub fn new(buy: Option<String>, sell: Option<String>) -> Self {
        Self { buy, sell }
    }

    /// 매수/매도 중 하나라도 값이 있는지
    pub fn has_any(&self) -> bool {
        self.buy.is_some() || self.sell.is_some()
    }
}

/// 금 시세 스냅샷.
///
/// 캐시는 이 레코드를 통째로 교체하며 필드 단위로 수정하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// 황금 통장 (1g 기준)
    pub passbook: QuotePair,
    /// 실물 골드바 (1냥 기준)
    pub physical: QuotePair,
    /// 게시 시각 (은행 페이지 원문)
    pub timestamp: Option<String>,
    /// 국제 금값 추세 요약
    pub trend: Option<String>,
}

impl PriceRecord {
    /// 네 개의 가격 필드 중 하나라도 값이 있는지 확인합니다.
    pub fn has_any_price(&self) -> bool {
        self.passbook.has_any() || self.physical.has_any()
    }

    /// 게시 시각이 있고 공백이 아닌지 확인합니다.
    ///
    /// 한 번도 갱신되지 않은 캐시를 구분하는 데 사용합니다.
    pub fn has_timestamp(&self) -> bool {
        self.timestamp
            .as_deref()
            .map(|ts| !ts.trim().is_empty())
            .unwrap_or(false)
    }

    /// 추세 문구를 설정한 새 레코드를 반환합니다.
    pub fn with_trend(mut self, trend: impl Into<String>) -> Self {
        self.trend = Some(trend.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PriceRecord {
        PriceRecord {
            passbook: QuotePair::new(Some("2,310".to_string()), Some("2,345".to_string())),
            physical: QuotePair::new(Some("5,300".to_string()), None),
            timestamp: Some("2024/01/02 09:01".to_string()),
            trend: None,
        }
    }

    #[test]
    fn test_default_record_is_empty() {
        let record = PriceRecord::default();
        assert!(!record.has_any_price());
        assert!(!record.has_timestamp());
    }

    #[test]
    fn test_blank_timestamp_is_not_populated() {
        let record = PriceRecord {
            timestamp: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!record.has_timestamp());
    }

    #[test]
    fn test_has_any_price() {
        assert!(sample().has_any_price());

        let only_physical_sell = PriceRecord {
            physical: QuotePair::new(None, Some("5,400".to_string())),
            ..Default::default()
        };
        assert!(only_physical_sell.has_any_price());
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let json = serde_json::to_value(sample().with_trend(TREND_FAILED)).unwrap();
        assert_eq!(json["passbook"]["sell"], "2,345");
        assert_eq!(json["physical"]["buy"], "5,300");
        assert!(json["physical"]["sell"].is_null());
        assert_eq!(json["trend"], TREND_FAILED);
    }

    #[test]
    fn test_empty_record_json_shape() {
        let json = serde_json::to_value(PriceRecord::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "passbook": {"buy": null, "sell": null},
                "physical": {"buy": null, "sell": null},
                "timestamp": null,
                "trend": null
            })
        );
    }
}
