//! 기술적 지표 모듈.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (Simple Moving Average)
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (Relative Strength Index)
//!
//! # 사용 예시
//!
//! ```
//! use gold_analytics::indicators::{MomentumCalculator, RsiParams, SmaParams, TrendIndicators};
//! use rust_decimal::Decimal;
//!
//! let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(2000 + i)).collect();
//!
//! let sma = TrendIndicators::new().sma(&prices, SmaParams { period: 20 }).unwrap();
//! let rsi = MomentumCalculator::new().rsi(&prices, RsiParams { period: 14 }).unwrap();
//! assert_eq!(sma.len(), rsi.len());
//! ```

pub mod momentum;
pub mod trend;

use thiserror::Error;

use gold_core::GoldError;

pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{SmaParams, TrendIndicators};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

impl From<IndicatorError> for GoldError {
    fn from(err: IndicatorError) -> Self {
        GoldError::Parse(err.to_string())
    }
}
