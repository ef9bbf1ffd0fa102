//! 테스트용 스텁과 상태 생성 헬퍼.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gold_core::{GoldError, GoldResult, PriceRecord, QuotePair, QuoteProvider, TrendProvider};
use gold_data::{DataError, HistoricalLoader, HistoryStore, HtmlSource};
use gold_notification::{NotificationManager, NotificationResult, NotificationSender};

use crate::services::{PriceCache, RefreshService};
use crate::state::AppState;

/// 설정한 레코드를 돌려주는 시세 제공자. `None`이면 실패.
pub(crate) struct StubQuotes {
    record: Mutex<Option<PriceRecord>>,
    calls: AtomicUsize,
}

impl StubQuotes {
    pub(crate) fn new(record: Option<PriceRecord>) -> Arc<Self> {
        Arc::new(Self {
            record: Mutex::new(record),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn set(&self, record: Option<PriceRecord>) {
        *self.record.lock().unwrap() = record;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for StubQuotes {
    async fn fetch_quote(&self) -> GoldResult<PriceRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.record
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| GoldError::Fetch("connection refused".to_string()))
    }
}

/// 고정 요약을 돌려주는 추세 제공자. `None`이면 실패.
pub(crate) struct StubTrend(pub Option<&'static str>);

#[async_trait]
impl TrendProvider for StubTrend {
    async fn fetch(&self) -> GoldResult<String> {
        self.0
            .map(str::to_string)
            .ok_or_else(|| GoldError::Fetch("yahoo down".to_string()))
    }
}

/// 항상 실패하는 HTML 소스.
pub(crate) struct OfflineSource;

#[async_trait]
impl HtmlSource for OfflineSource {
    async fn fetch_html(&self, _url: &str) -> gold_data::Result<String> {
        Err(DataError::FetchError("offline".to_string()))
    }
}

/// 전송된 메시지를 기록하는 전송기.
#[derive(Clone, Default)]
pub(crate) struct RecordingSender {
    pub sent: Arc<Mutex<Vec<String>>>,
}

impl RecordingSender {
    pub(crate) fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send_text(&self, text: &str) -> NotificationResult<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// 은행 페이지에서 가져온 것과 같은 모양의 레코드.
pub(crate) fn sample_quote() -> PriceRecord {
    PriceRecord {
        passbook: QuotePair::new(Some("2,310".to_string()), Some("2,345".to_string())),
        physical: QuotePair::new(Some("5,300".to_string()), Some("5,520".to_string())),
        timestamp: Some("2024/01/02 09:01".to_string()),
        trend: None,
    }
}

/// 스텁 제공자로 갱신 서비스를 만듭니다.
pub(crate) fn refresh_service(
    quotes: Arc<StubQuotes>,
    trend: Option<&'static str>,
) -> (RefreshService, RecordingSender) {
    let sender = RecordingSender::default();
    let mut notifier = NotificationManager::new(chrono_tz::Asia::Taipei);
    notifier.add_sender(sender.clone());

    let service = RefreshService::new(
        quotes,
        Arc::new(StubTrend(trend)),
        PriceCache::new(),
        Arc::new(notifier),
    );
    (service, sender)
}

/// 네트워크 없이 동작하는 AppState.
pub(crate) fn create_test_state(quotes: Arc<StubQuotes>, cache_dir: &Path) -> AppState {
    let (refresh, _sender) = refresh_service(quotes, Some("國際金價: $2,345.68"));
    let history = HistoricalLoader::new(
        Arc::new(OfflineSource),
        HistoryStore::new(cache_dir.join("history_data.json")),
        "http://bot/ltm",
        chrono_tz::Asia::Taipei,
    );
    AppState::new(Arc::new(refresh), Arc::new(history))
}
