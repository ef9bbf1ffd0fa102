//! 외부 데이터 제공자.
//!
//! - `http`: 페이지 HTML 수집 (reqwest)
//! - `bot_quote`: 실시간 금 시세 페이지
//! - `bot_history`: 최근 1년 과거 시세 페이지
//! - `yahoo`: 국제 금 선물 추세

pub mod bot_history;
pub mod bot_quote;
pub mod http;
pub mod yahoo;

pub use bot_history::parse_history_page;
pub use bot_quote::{parse_quote_page, BotQuoteFetcher};
pub use http::{HtmlSource, HttpHtmlClient};
pub use yahoo::{DisabledTrendProvider, YahooTrendProvider};
