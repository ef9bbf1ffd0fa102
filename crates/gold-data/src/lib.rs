//! 시세 데이터 수집.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 대만은행(Bank of Taiwan) 실시간 금 시세 페이지 파싱 및 수집
//! - 최근 1년 과거 시세 페이지 파싱, JSON 캐시 파일 관리
//! - Yahoo Finance 기반 국제 금값(`GC=F`) 추세 제공자

pub mod cache;
pub mod error;
pub mod provider;

pub use cache::{HistoricalLoader, HistoryStore};
pub use error::{DataError, Result};
pub use provider::{
    parse_history_page, parse_quote_page, BotQuoteFetcher, DisabledTrendProvider, HtmlSource,
    HttpHtmlClient, YahooTrendProvider,
};
