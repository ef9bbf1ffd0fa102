//! 대만은행 실시간 금 시세 페이지.
//!
//! `https://rate.bot.com.tw/gold?Lang=zh-TW`에서 다음 값을 추출합니다.
//!
//! - 황금 통장(1g): `td.text-right.ebank` 셀 두 개 (0번 = 은행 매도, 1번 = 은행 매수)
//! - 골드바(1냥): `臺銀金鑽條塊`을 포함하고 `生肖版`(띠 기념판)은 포함하지 않는 첫 테이블의
//!   `本行買進` / `本行賣出` 행
//! - 게시 시각: `div.pull-left.trailer.text-info` (`掛牌時間：` 접두사 제거)
//!
//! 구조 요소가 없으면 해당 필드만 비워 두며 에러로 취급하지 않습니다.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};

use gold_core::{GoldResult, PriceRecord, QuoteProvider, QuotePair};

use super::http::HtmlSource;
use crate::error::{DataError, Result};

/// 골드바 테이블 식별 문자열
const BAR_TABLE_MARKER: &str = "臺銀金鑽條塊";
/// 제외할 띠 기념판 테이블 식별 문자열
const ZODIAC_MARKER: &str = "生肖版";
/// 은행 매수 행
const BANK_BUYS_ROW: &str = "本行買進";
/// 은행 매도 행
const BANK_SELLS_ROW: &str = "本行賣出";
/// 게시 시각 접두사
const TIMESTAMP_PREFIX: &str = "掛牌時間：";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::ParseError(format!("셀렉터 오류 ({}): {}", css, e)))
}

/// 시세 페이지 HTML을 레코드로 변환합니다.
///
/// 반환되는 레코드의 `trend`는 항상 `None`입니다.
/// 가격 필드가 모두 비어 있으면 페이지 구조 변경 경고를 남기고 빈 레코드를 그대로 반환합니다.
pub fn parse_quote_page(html: &str) -> GoldResult<PriceRecord> {
    let document = Html::parse_document(html);

    let passbook = extract_passbook(&document)?;
    let physical = extract_physical_bar(&document)?;
    let timestamp = extract_timestamp(&document)?;

    let record = PriceRecord {
        passbook,
        physical,
        timestamp,
        trend: None,
    };

    if !record.has_any_price() {
        warn!("시세 필드가 모두 비어 있음 (페이지 구조 변경 가능성)");
    } else {
        debug!(
            passbook_sell = ?record.passbook.sell,
            passbook_buy = ?record.passbook.buy,
            physical_buy = ?record.physical.buy,
            "시세 페이지 파싱 완료"
        );
    }

    Ok(record)
}

/// 황금 통장 매도/매수가.
fn extract_passbook(document: &Html) -> GoldResult<QuotePair> {
    let ebank = selector("td.text-right.ebank")?;
    let cells: Vec<ElementRef> = document.select(&ebank).collect();

    if cells.len() < 2 {
        return Ok(QuotePair::default());
    }

    Ok(QuotePair {
        sell: leading_number(&element_text(&cells[0])),
        buy: leading_number(&element_text(&cells[1])),
    })
}

/// 1냥 골드바 매수/매도가.
fn extract_physical_bar(document: &Html) -> GoldResult<QuotePair> {
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let price_selector = selector("td.text-right")?;

    let bar_table = document.select(&table_selector).find(|table| {
        let text = marker_text(table);
        text.contains(BAR_TABLE_MARKER) && !text.contains(ZODIAC_MARKER)
    });

    let Some(table) = bar_table else {
        return Ok(QuotePair::default());
    };

    let row_price = |marker: &str| -> Option<String> {
        table
            .select(&row_selector)
            .filter(|row| marker_text(row).contains(marker))
            .find_map(|row| {
                row.select(&price_selector)
                    .next()
                    .map(|td| element_text(&td).trim().to_string())
            })
            .filter(|price| !price.is_empty())
    };

    Ok(QuotePair {
        buy: row_price(BANK_BUYS_ROW),
        sell: row_price(BANK_SELLS_ROW),
    })
}

/// 게시 시각.
fn extract_timestamp(document: &Html) -> GoldResult<Option<String>> {
    let trailer = selector("div.pull-left.trailer.text-info")?;

    Ok(document.select(&trailer).next().and_then(|div| {
        let text = element_text(&div).trim().replace(TIMESTAMP_PREFIX, "");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }))
}

/// 식별 문자열 검색용 텍스트. 인라인 태그로 나뉜 문자열도 이어지도록 구분자 없이 붙입니다.
fn marker_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// 요소의 텍스트 노드를 공백으로 이어 붙입니다.
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// 셀 텍스트에서 처음 나오는 숫자 토큰(숫자, `,`, `.`)을 추출합니다.
///
/// "2,345 買進" -> "2,345", "5276買進" -> "5276"
fn leading_number(text: &str) -> Option<String> {
    text.split_whitespace().find_map(|token| {
        let number: String = token
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
            .collect();
        let has_digit = number.chars().any(|c| c.is_ascii_digit());
        has_digit.then_some(number)
    })
}

/// 대만은행 시세 수집기.
pub struct BotQuoteFetcher {
    source: Arc<dyn HtmlSource>,
    url: String,
}

impl BotQuoteFetcher {
    /// 새 수집기 생성
    pub fn new(source: Arc<dyn HtmlSource>, url: impl Into<String>) -> Self {
        Self {
            source,
            url: url.into(),
        }
    }
}

#[async_trait]
impl QuoteProvider for BotQuoteFetcher {
    async fn fetch_quote(&self) -> GoldResult<PriceRecord> {
        let html = self.source.fetch_html(&self.url).await?;
        parse_quote_page(&html)
    }
}
