//! 과거 시세 JSON 캐시와 로더.
//!
//! 캐시 파일의 마지막 날짜가 로컬 기준 오늘이면 네트워크 요청 없이 캐시를 반환하고,
//! 아니면 과거 시세 페이지를 새로 가져와 파일을 덮어씁니다.
//!
//! 캐시 파일 형식:
//! ```json
//! {
//!   "dates": ["2024-01-01", "2024-01-02"],
//!   "prices": [2280.0, 2300.0]
//! }
//! ```

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use gold_core::HistorySeries;

use crate::error::{DataError, Result};
use crate::provider::{parse_history_page, HtmlSource};

/// 날짜 문자열 형식
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 과거 시세 캐시 파일.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// 캐시 파일 경로로 생성
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 캐시 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 캐시 파일을 읽습니다.
    ///
    /// 파일이 없거나 손상되었으면 빈 시계열을 반환합니다.
    pub async fn load(&self) -> HistorySeries {
        match self.try_load().await {
            Ok(Some(series)) => series,
            Ok(None) => HistorySeries::default(),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "과거 시세 캐시 읽기 실패");
                HistorySeries::default()
            }
        }
    }

    async fn try_load(&self) -> Result<Option<HistorySeries>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let series: HistorySeries = serde_json::from_str(&content)?;
        if series.dates.len() != series.prices.len() {
            return Err(DataError::CacheError(format!(
                "dates/prices 길이 불일치 ({} != {})",
                series.dates.len(),
                series.prices.len()
            )));
        }

        Ok(Some(series))
    }

    /// 캐시 파일을 덮어씁니다.
    ///
    /// 같은 디렉토리의 임시 파일에 먼저 쓴 뒤 rename하므로
    /// 쓰기 도중 실패해도 기존 파일이 잘린 채로 남지 않습니다.
    pub async fn save(&self, series: &HistorySeries) -> Result<()> {
        let json = serde_json::to_string_pretty(series)?;
        let tmp_path = self.tmp_path();

        tokio::fs::write(&tmp_path, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        debug!(path = %self.path.display(), points = series.len(), "과거 시세 캐시 저장");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history_data.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// 과거 시세 로더.
///
/// 갱신은 비동기 뮤텍스로 직렬화되어 동시에 호출되어도 파일 쓰기가 겹치지 않습니다.
pub struct HistoricalLoader {
    source: Arc<dyn HtmlSource>,
    store: HistoryStore,
    url: String,
    tz: Tz,
    lock: Mutex<()>,
}

impl HistoricalLoader {
    /// 새 로더 생성
    pub fn new(
        source: Arc<dyn HtmlSource>,
        store: HistoryStore,
        url: impl Into<String>,
        tz: Tz,
    ) -> Self {
        Self {
            source,
            store,
            url: url.into(),
            tz,
            lock: Mutex::new(()),
        }
    }

    /// 로컬 시간대 기준 오늘 날짜로 최신 과거 시세를 반환합니다.
    pub async fn get_historical_data(&self) -> HistorySeries {
        let today = Utc::now().with_timezone(&self.tz).date_naive();
        self.get_historical_data_on(today).await
    }

    /// 주어진 날짜를 오늘로 간주하여 최신 과거 시세를 반환합니다.
    ///
    /// 수집 실패, 파싱 실패, 항목 없음이면 기존 캐시를 그대로 반환합니다.
    pub async fn get_historical_data_on(&self, today: NaiveDate) -> HistorySeries {
        let _guard = self.lock.lock().await;

        let cache = self.store.load().await;
        let today_str = today.format(DATE_FORMAT).to_string();

        if cache.last_date() == Some(today_str.as_str()) {
            debug!(date = %today_str, "과거 시세 캐시가 최신 상태");
            return cache;
        }

        info!(url = %self.url, "과거 시세 페이지 요청");
        let html = match self.source.fetch_html(&self.url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "과거 시세 수집 실패, 기존 캐시 사용");
                return cache;
            }
        };

        let entries = match parse_history_page(&html) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "과거 시세 파싱 실패, 기존 캐시 사용");
                return cache;
            }
        };

        if entries.is_empty() {
            warn!("과거 시세 항목 없음, 기존 캐시 사용");
            return cache;
        }

        let series = HistorySeries::from_entries(entries);
        if let Err(e) = self.store.save(&series).await {
            error!(error = %e, "과거 시세 캐시 저장 실패");
        }

        info!(points = series.len(), last = ?series.last_date(), "과거 시세 갱신 완료");
        series
    }
}
