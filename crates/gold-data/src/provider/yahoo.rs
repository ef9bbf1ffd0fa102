//! Yahoo Finance 기반 국제 금값 추세 제공자.
//!
//! 금 선물(`GC=F`) 일봉 종가를 조회해 한 줄 추세 요약을 만듭니다.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info};
use yahoo_finance_api as yahoo;

use gold_analytics::summarize_trend;
use gold_core::{GoldError, GoldResult, TrendConfig, TrendProvider};

/// 일봉 간격
const DAILY_INTERVAL: &str = "1d";

/// Yahoo Finance 추세 제공자.
pub struct YahooTrendProvider {
    connector: yahoo::YahooConnector,
    symbol: String,
    range: String,
}

impl YahooTrendProvider {
    /// 새로운 제공자 생성.
    pub fn new(config: &TrendConfig) -> GoldResult<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| GoldError::Fetch(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self {
            connector,
            symbol: config.symbol.clone(),
            range: config.range.clone(),
        })
    }

    /// 종가 시계열 조회 (오래된 것부터).
    async fn fetch_closes(&self) -> GoldResult<Vec<Decimal>> {
        info!(symbol = %self.symbol, range = %self.range, "국제 금값 조회");

        let response = self
            .connector
            .get_quote_range(&self.symbol, DAILY_INTERVAL, &self.range)
            .await
            .map_err(|e| {
                GoldError::Fetch(format!("Yahoo Finance API 오류 ({}): {}", self.symbol, e))
            })?;

        let mut quotes = response
            .quotes()
            .map_err(|e| GoldError::Fetch(format!("Quote 데이터 없음 ({}): {}", self.symbol, e)))?;

        if quotes.is_empty() {
            return Err(GoldError::Fetch(format!("심볼 {} 데이터 없음", self.symbol)));
        }

        quotes.sort_by_key(|q| q.timestamp);
        let closes: Vec<Decimal> = quotes
            .iter()
            .filter_map(|q| Decimal::from_f64_retain(q.close).map(|c| c.round_dp(4)))
            .collect();

        debug!(symbol = %self.symbol, count = closes.len(), "종가 수신");
        Ok(closes)
    }
}

#[async_trait]
impl TrendProvider for YahooTrendProvider {
    async fn fetch(&self) -> GoldResult<String> {
        let closes = self.fetch_closes().await?;
        Ok(summarize_trend(&closes)?)
    }
}

/// 추세 분석을 끈 경우 사용하는 제공자.
///
/// 항상 실패하므로 레코드에는 분석 실패 문구가 들어갑니다.
#[derive(Debug, Default)]
pub struct DisabledTrendProvider;

#[async_trait]
impl TrendProvider for DisabledTrendProvider {
    async fn fetch(&self) -> GoldResult<String> {
        Err(GoldError::Fetch("추세 분석 비활성화".to_string()))
    }
}
