//! 기술적 지표 및 국제 금값 추세 분석.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 기술적 지표 (SMA, RSI)
//! - 종가 시계열로부터 한 줄 추세 요약 생성

pub mod indicators;
pub mod market_trend;

pub use indicators::{
    IndicatorError, IndicatorResult, MomentumCalculator, RsiParams, SmaParams, TrendIndicators,
};
pub use market_trend::summarize_trend;
