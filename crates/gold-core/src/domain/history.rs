//! 일별 과거 시세 시계열.

use serde::{Deserialize, Serialize};

/// 일별 과거 시세.
///
/// `dates`와 `prices`는 길이가 같고 인덱스로 짝지어지며,
/// 날짜(`YYYY-MM-DD`)는 엄격히 오름차순입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

impl HistorySeries {
    /// (날짜, 가격) 항목에서 시계열을 생성합니다.
    ///
    /// 날짜 문자열 기준으로 오름차순 정렬하고, 중복 날짜는 처음 나온 항목만 유지합니다.
    pub fn from_entries(mut entries: Vec<(String, f64)>) -> Self {
        // stable sort: 같은 날짜끼리는 원래 순서 유지
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);

        let (dates, prices) = entries.into_iter().unzip();
        Self { dates, prices }
    }

    /// 마지막(가장 최근) 날짜
    pub fn last_date(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }

    /// 항목 수
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// 비어 있는지
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_ascending() {
        let series = HistorySeries::from_entries(vec![
            ("2024-01-02".to_string(), 2300.0),
            ("2024-01-01".to_string(), 2280.0),
        ]);
        assert_eq!(series.dates, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(series.prices, vec![2280.0, 2300.0]);
        assert_eq!(series.last_date(), Some("2024-01-02"));
    }

    #[test]
    fn test_from_entries_drops_duplicate_dates() {
        let series = HistorySeries::from_entries(vec![
            ("2024-01-03".to_string(), 2310.0),
            ("2024-01-02".to_string(), 2300.0),
            ("2024-01-03".to_string(), 9999.0),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.prices, vec![2300.0, 2310.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = HistorySeries::default();
        assert!(series.is_empty());
        assert_eq!(series.last_date(), None);
    }
}
