//! 모멘텀 지표 (Momentum Indicators).
//!
//! 과매수/과매도 상태를 측정하는 RSI를 제공합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 평균은 재귀형 지수 가중 평균(alpha = 1/period)으로,
    /// 첫 값에서 시작해 `y[t] = alpha * x[t] + (1 - alpha) * y[t-1]`로 갱신합니다.
    ///
    /// # 반환
    /// 0-100 사이의 RSI 값들 (처음 period개는 None)
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period + 1 {
            return Err(IndicatorError::InsufficientData {
                required: period + 1,
                provided: prices.len(),
            });
        }

        // 가격 변화 계산
        let mut deltas = Vec::with_capacity(prices.len());
        deltas.push(Decimal::ZERO); // 첫 번째는 변화 없음
        for i in 1..prices.len() {
            deltas.push(prices[i] - prices[i - 1]);
        }

        // 상승/하락 분리
        let gains: Vec<Decimal> = deltas
            .iter()
            .map(|&d| if d > Decimal::ZERO { d } else { Decimal::ZERO })
            .collect();
        let losses: Vec<Decimal> = deltas
            .iter()
            .map(|&d| if d < Decimal::ZERO { d.abs() } else { Decimal::ZERO })
            .collect();

        let alpha = Decimal::ONE / Decimal::from(period);
        let avg_gains = self.ewm(&gains, alpha);
        let avg_losses = self.ewm(&losses, alpha);

        let mut result = Vec::with_capacity(prices.len());
        for i in 0..prices.len() {
            if i < period {
                result.push(None);
                continue;
            }

            let (gain, loss) = (avg_gains[i], avg_losses[i]);
            if loss == Decimal::ZERO {
                result.push(Some(dec!(100)));
            } else {
                let rs = gain / loss;
                result.push(Some(dec!(100) - (dec!(100) / (Decimal::ONE + rs))));
            }
        }

        Ok(result)
    }

    /// 마지막 시점의 RSI 값만 계산.
    pub fn latest_rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Decimal> {
        let series = self.rsi(prices, params)?;
        series
            .last()
            .copied()
            .flatten()
            .ok_or(IndicatorError::InsufficientData {
                required: params.period + 1,
                provided: prices.len(),
            })
    }

    /// EWM (Exponential Weighted Mean) 계산.
    fn ewm(&self, values: &[Decimal], alpha: Decimal) -> Vec<Decimal> {
        let one_minus_alpha = Decimal::ONE - alpha;
        let mut result = Vec::with_capacity(values.len());

        let Some(&first) = values.first() else {
            return result;
        };

        let mut ewm_value = first;
        result.push(ewm_value);
        for &value in &values[1..] {
            ewm_value = (value * alpha) + (ewm_value * one_minus_alpha);
            result.push(ewm_value);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_prices() -> Vec<Decimal> {
        vec![
            dec!(100.0),
            dec!(102.0),
            dec!(101.0),
            dec!(103.0),
            dec!(105.0),
            dec!(104.0),
            dec!(106.0),
            dec!(108.0),
            dec!(107.0),
            dec!(109.0),
            dec!(111.0),
            dec!(110.0),
            dec!(112.0),
            dec!(114.0),
            dec!(113.0),
            dec!(115.0),
        ]
    }

    #[test]
    fn test_rsi_calculation() {
        let momentum = MomentumCalculator::new();
        let prices = sample_prices();

        let rsi = momentum.rsi(&prices, RsiParams { period: 14 }).unwrap();

        assert_eq!(rsi.len(), prices.len());
        assert!(rsi[13].is_none());
        assert!(rsi[14].is_some());
        for value in rsi.iter().flatten() {
            assert!(*value >= Decimal::ZERO);
            assert!(*value <= dec!(100));
        }
    }

    #[test]
    fn test_rsi_bullish_market() {
        let momentum = MomentumCalculator::new();

        // 계속 상승하는 시장 (하락폭 0)
        let prices: Vec<Decimal> = (0..20).map(|i| Decimal::from(100 + i)).collect();

        let last = momentum.latest_rsi(&prices, RsiParams::default()).unwrap();
        assert_eq!(last, dec!(100));
    }

    #[test]
    fn test_rsi_bearish_market() {
        let momentum = MomentumCalculator::new();

        // 계속 하락하는 시장
        let prices: Vec<Decimal> = (0..20).map(|i| Decimal::from(200 - i)).collect();

        let last = momentum.latest_rsi(&prices, RsiParams::default()).unwrap();
        assert_eq!(last, Decimal::ZERO);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let momentum = MomentumCalculator::new();
        let result = momentum.rsi(&sample_prices()[..10], RsiParams { period: 14 });
        assert!(matches!(
            result,
            Err(IndicatorError::InsufficientData {
                required: 15,
                provided: 10
            })
        ));
    }

    proptest! {
        #[test]
        fn prop_rsi_stays_in_range(raw in proptest::collection::vec(1_000u32..3_000u32, 15..60)) {
            let prices: Vec<Decimal> = raw.into_iter().map(Decimal::from).collect();
            let rsi = MomentumCalculator::new().rsi(&prices, RsiParams::default()).unwrap();
            for value in rsi.iter().flatten() {
                prop_assert!(*value >= Decimal::ZERO && *value <= dec!(100));
            }
        }
    }
}
