//! 대만은행 최근 1년 과거 시세 페이지.
//!
//! `https://rate.bot.com.tw/gold/chart/ltm/TWD`의 표에서 날짜(0번 열)와
//! 은행 매수가(3번 열)를 추출합니다. 페이지는 보통 최신순입니다.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use gold_core::format::strip_thousands;
use gold_core::GoldResult;

use crate::error::{DataError, Result};

/// 날짜 열
const DATE_COLUMN: usize = 0;
/// 은행 매수가 열
const PRICE_COLUMN: usize = 3;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::ParseError(format!("셀렉터 오류 ({}): {}", css, e)))
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// 과거 시세 페이지 HTML에서 (날짜, 가격) 항목을 추출합니다.
///
/// 첫 번째 `tbody`의 행을 사용하고, 없으면 `table.table-striped`의 행을 사용합니다.
/// 셀이 4개 미만이거나 가격이 숫자가 아닌 행은 건너뜁니다.
/// 날짜의 `/`는 `-`로 바뀌며, 항목 순서는 페이지 순서 그대로입니다.
pub fn parse_history_page(html: &str) -> GoldResult<Vec<(String, f64)>> {
    let document = Html::parse_document(html);

    let tbody = selector("tbody")?;
    let striped = selector("table.table-striped")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let Some(root) = document
        .select(&tbody)
        .next()
        .or_else(|| document.select(&striped).next())
    else {
        debug!("과거 시세 표를 찾을 수 없음");
        return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    for row in root.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() <= PRICE_COLUMN {
            continue;
        }

        let date = cell_text(&cells[DATE_COLUMN]).replace('/', "-");
        let price = strip_thousands(&cell_text(&cells[PRICE_COLUMN]));

        match price.parse::<f64>() {
            Ok(value) if value.is_finite() && !date.is_empty() => entries.push((date, value)),
            _ => continue,
        }
    }

    debug!(count = entries.len(), "과거 시세 파싱 완료");
    Ok(entries)
}
