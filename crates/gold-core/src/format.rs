//! 천 단위 구분 기호가 포함된 가격 문자열 처리.
//!
//! 은행 페이지의 가격은 "5,300" 형태의 문자열로 저장되므로
//! 계산 전에 구분 기호를 제거하고, 출력 시 다시 붙입니다.

use rust_decimal::Decimal;
use std::str::FromStr;

/// 천 단위 구분 기호(`,`)를 제거합니다.
///
/// "1,234,567" -> "1234567"
pub fn strip_thousands(text: &str) -> String {
    text.trim().chars().filter(|c| *c != ',').collect()
}

/// 구분 기호가 포함된 문자열을 Decimal로 파싱합니다.
///
/// 숫자가 아니면 None을 반환합니다 ("N/A", "", "--" 등).
pub fn parse_grouped_decimal(text: &str) -> Option<Decimal> {
    let cleaned = strip_thousands(text);
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Decimal을 천 단위 구분 기호와 고정 소수 자릿수로 포맷합니다.
///
/// 반올림은 banker's rounding(half-to-even)을 사용합니다.
///
/// ```
/// use gold_core::format::format_grouped;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_grouped(Decimal::new(23850, 0), 0), "23,850");
/// assert_eq!(format_grouped(Decimal::new(234567891, 5), 2), "2,345.68");
/// ```
pub fn format_grouped(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp(dp);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", dp as usize, rounded.abs());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + dp as usize + 2);
    if negative {
        grouped.push('-');
    }
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    grouped
}
