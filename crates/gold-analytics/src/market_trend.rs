//! 국제 금값 추세 요약.
//!
//! 일봉 종가 시계열에서 현재가, MA5, MA20, RSI(14)를 계산하여
//! 알림 메시지에 그대로 붙일 수 있는 한 줄 문자열을 만듭니다.
//!
//! ```text
//! 國際金價: $2,345.68 | 趨勢: 多頭 (站上月線) | (短線強勢) | RSI: 72.4 | ⚠️ 過熱 (超買區)
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gold_core::format::format_grouped;

use crate::indicators::{
    IndicatorError, IndicatorResult, MomentumCalculator, RsiParams, SmaParams, TrendIndicators,
};

/// 단기 이동평균 기간
const SHORT_MA_PERIOD: usize = 5;
/// 월선(20일) 이동평균 기간
const LONG_MA_PERIOD: usize = 20;
/// RSI 기간
const RSI_PERIOD: usize = 14;

const OVERBOUGHT: Decimal = dec!(70);
const OVERSOLD: Decimal = dec!(30);

const SEPARATOR: &str = " | ";

/// 종가 시계열을 한 줄 추세 요약으로 변환합니다.
///
/// 종가는 오래된 것부터 최신 순서여야 합니다.
///
/// # Errors
///
/// 종가가 비어 있거나 MA20, RSI14를 계산하기에 부족하면 `InsufficientData`.
pub fn summarize_trend(closes: &[Decimal]) -> IndicatorResult<String> {
    let Some(&current) = closes.last() else {
        return Err(IndicatorError::InsufficientData {
            required: LONG_MA_PERIOD,
            provided: 0,
        });
    };

    let trend = TrendIndicators::new();
    let ma5 = trend.latest_sma(closes, SmaParams { period: SHORT_MA_PERIOD })?;
    let ma20 = trend.latest_sma(closes, SmaParams { period: LONG_MA_PERIOD })?;
    let rsi = MomentumCalculator::new().latest_rsi(closes, RsiParams { period: RSI_PERIOD })?;

    let mut parts = vec![format!("國際金價: ${}", format_grouped(current, 2))];

    if current > ma20 {
        parts.push("趨勢: 多頭 (站上月線)".to_string());
    } else {
        parts.push("趨勢: 空頭 (跌破月線)".to_string());
    }

    if current > ma5 {
        parts.push("(短線強勢)".to_string());
    }

    parts.push(format!("RSI: {:.1}", rsi.round_dp(1)));
    if rsi > OVERBOUGHT {
        parts.push("⚠️ 過熱 (超買區)".to_string());
    } else if rsi < OVERSOLD {
        parts.push("🟢 超賣 (反彈機會)".to_string());
    }

    Ok(parts.join(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_market_summary() {
        // 2000, 2001, ..., 2029: 하락 없음 → RSI 100
        let closes: Vec<Decimal> = (0..30).map(|i| Decimal::from(2000 + i)).collect();

        let summary = summarize_trend(&closes).unwrap();
        assert_eq!(
            summary,
            "國際金價: $2,029.00 | 趨勢: 多頭 (站上月線) | (短線強勢) | RSI: 100.0 | ⚠️ 過熱 (超買區)"
        );
    }

    #[test]
    fn test_falling_market_summary() {
        let closes: Vec<Decimal> = (0..30).map(|i| Decimal::from(2100 - i)).collect();

        let summary = summarize_trend(&closes).unwrap();
        assert_eq!(
            summary,
            "國際金價: $2,071.00 | 趨勢: 空頭 (跌破月線) | RSI: 0.0 | 🟢 超賣 (反彈機會)"
        );
    }

    #[test]
    fn test_neutral_rsi_has_no_flag() {
        // 등락 반복: RSI가 30~70 사이
        let closes: Vec<Decimal> = (0..30)
            .map(|i| if i % 2 == 0 { dec!(2000) } else { dec!(2010) })
            .collect();

        let summary = summarize_trend(&closes).unwrap();
        assert!(summary.contains("RSI: "));
        assert!(!summary.contains("過熱"));
        assert!(!summary.contains("超賣"));
        // 마지막 값 2010 > MA5 2006 → 단기 강세 포함
        assert!(summary.contains("(短線強勢)"));
        assert_eq!(summary.split(SEPARATOR).count(), 4);
    }

    #[test]
    fn test_too_few_closes() {
        let closes: Vec<Decimal> = (0..10).map(|i| Decimal::from(2000 + i)).collect();
        assert!(matches!(
            summarize_trend(&closes),
            Err(IndicatorError::InsufficientData { .. })
        ));
        assert!(summarize_trend(&[]).is_err());
    }
}
