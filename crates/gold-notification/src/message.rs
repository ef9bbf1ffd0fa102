//! 시세 알림 메시지 포맷.
//!
//! ```text
//! [台銀黃金報價] 2024/01/02 09:01
//! 存摺賣出: 2,345
//! 存摺回收: 2,310
//! 實體賣出(1兩): 5,520
//! 實體回收(1兩): 5,300
//! 實體回收(1錢): 530
//! 實體回收(4.5兩): 23,850
//! 國際金價: $2,345.68 | 趨勢: 多頭 (站上月線) | RSI: 55.2
//! ```

use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gold_core::format::{format_grouped, parse_grouped_decimal};
use gold_core::{PriceRecord, NOT_AVAILABLE, TREND_MISSING};

/// 1냥 = 10전
const MACE_PER_TAEL: Decimal = dec!(10);
/// 4.5냥 묶음
const LOT_TAELS: Decimal = dec!(4.5);

/// 1냥 골드바 회수가에서 파생한 값.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPhysicalPrices {
    /// 1전 회수가
    pub per_mace: String,
    /// 4.5냥 회수가
    pub lot: String,
}

/// 1냥 회수가(`physical.buy`)에서 1전/4.5냥 가격을 계산합니다.
///
/// 값이 없거나 `N/A`이거나 숫자가 아니면 해당 필드는 `N/A`입니다.
/// 결과는 천 단위 구분 기호를 붙이고 소수점 없이 반올림(half-to-even)합니다.
pub fn derive_physical_prices(physical_buy: Option<&str>) -> DerivedPhysicalPrices {
    let tael = physical_buy
        .filter(|v| v.trim() != NOT_AVAILABLE)
        .and_then(parse_grouped_decimal);

    let derive = |f: fn(Decimal) -> Option<Decimal>| -> String {
        tael.and_then(f)
            .map(|value| format_grouped(value, 0))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    DerivedPhysicalPrices {
        per_mace: derive(|v| v.checked_div(MACE_PER_TAEL)),
        lot: derive(|v| v.checked_mul(LOT_TAELS)),
    }
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

/// 시세 레코드를 알림 메시지로 포맷합니다.
///
/// 게시 시각이 없으면 `now`의 `HH:MM`을 사용합니다.
pub fn format_price_message(record: &PriceRecord, now: DateTime<Tz>) -> String {
    let timestamp = match record.timestamp.as_deref() {
        Some(ts) if !ts.trim().is_empty() => ts.to_string(),
        _ => now.format("%H:%M").to_string(),
    };

    let physical_buy = record.physical.buy.as_deref();
    let derived = derive_physical_prices(physical_buy);

    let trend = match record.trend.as_deref() {
        Some(t) if !t.trim().is_empty() => t,
        _ => TREND_MISSING,
    };

    format!(
        "[台銀黃金報價] {timestamp}\n\
         存摺賣出: {}\n\
         存摺回收: {}\n\
         實體賣出(1兩): {}\n\
         實體回收(1兩): {}\n\
         實體回收(1錢): {}\n\
         實體回收(4.5兩): {}\n\
         {trend}",
        or_na(record.passbook.sell.as_deref()),
        or_na(record.passbook.buy.as_deref()),
        or_na(record.physical.sell.as_deref()),
        or_na(physical_buy),
        derived.per_mace,
        derived.lot,
    )
}
