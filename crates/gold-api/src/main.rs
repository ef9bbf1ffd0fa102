//! 금 시세 API 서버 진입점.
//!
//! 설정 로드 → 로깅 초기화 → 서비스 조립 → 스케줄러 시작 → HTTP 서버 실행 순서로 진행합니다.

use anyhow::Context;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use gold_api::{create_api_router, AppState, Job, PriceCache, RefreshService, Scheduler, Trigger};
use gold_core::{init_logging, AppConfig, LogConfig, QuoteProvider, TrendProvider};
use gold_data::{
    BotQuoteFetcher, DisabledTrendProvider, HistoricalLoader, HistoryStore, HttpHtmlClient,
    YahooTrendProvider,
};
use gold_notification::{ChatWebhookSender, NotificationManager, WebhookConfig};

/// 요청 전역 타임아웃. 수동 갱신의 업스트림 타임아웃보다 길어야 합니다.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// CORS 레이어 생성.
///
/// `CORS_ORIGINS`(쉼표 구분)가 설정되면 해당 origin만 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer())
}

/// 백그라운드 작업 등록.
fn build_scheduler(
    config: &AppConfig,
    refresh: Arc<RefreshService>,
    history: Arc<HistoricalLoader>,
) -> anyhow::Result<Scheduler> {
    let schedule = &config.schedule;
    let mut scheduler = Scheduler::new(schedule.tz()?);

    let service = refresh.clone();
    scheduler.add_job(Job::new(
        "update_price_cache",
        Trigger::Interval(schedule.refresh_interval()),
        move || {
            let service = service.clone();
            async move {
                service.update_price_cache().await;
            }
        },
    ));

    let service = refresh.clone();
    scheduler.add_job(Job::new(
        "daily_notify",
        Trigger::DailyAt(schedule.daily_notify_at()?),
        move || {
            let service = service.clone();
            async move { service.job_daily_notify().await }
        },
    ));

    if schedule.notify_on_startup {
        let service = refresh;
        scheduler.add_job(Job::new("startup_notify", Trigger::Once, move || {
            let service = service.clone();
            async move { service.job_daily_notify().await }
        }));
    }

    scheduler.add_job(Job::new("warm_history", Trigger::Once, move || {
        let history = history.clone();
        async move {
            let series = history.get_historical_data().await;
            info!(points = series.len(), "과거 시세 캐시 준비 완료");
        }
    }));

    Ok(scheduler)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드
    dotenvy::dotenv().ok();

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting gold quote server");

    let tz = config.schedule.tz()?;
    let scraper = &config.scraper;

    // 은행 페이지 클라이언트 (페이지별 타임아웃)
    let quote_client = HttpHtmlClient::new(scraper.quote_timeout(), &scraper.user_agent)?;
    let history_client = HttpHtmlClient::new(scraper.history_timeout(), &scraper.user_agent)?;

    let quotes: Arc<dyn QuoteProvider> = Arc::new(BotQuoteFetcher::new(
        Arc::new(quote_client),
        scraper.quote_url.clone(),
    ));

    let trend: Arc<dyn TrendProvider> = if config.trend.enabled {
        Arc::new(YahooTrendProvider::new(&config.trend)?)
    } else {
        info!("국제 금값 추세 분석 비활성화");
        Arc::new(DisabledTrendProvider)
    };

    let mut notifier = NotificationManager::new(tz);
    notifier.add_sender(ChatWebhookSender::new(WebhookConfig::from(&config.notification))?);
    if !notifier.has_active_sender() {
        warn!("웹훅 URL이 설정되지 않아 알림을 보내지 않습니다 (GOLD_NOTIFICATION__WEBHOOK_URL)");
    }

    let refresh = Arc::new(RefreshService::new(
        quotes,
        trend,
        PriceCache::new(),
        Arc::new(notifier),
    ));

    let history = Arc::new(HistoricalLoader::new(
        Arc::new(history_client),
        HistoryStore::new(&scraper.history_cache_path),
        scraper.history_url.clone(),
        tz,
    ));

    let state = Arc::new(AppState::new(refresh.clone(), history.clone()));
    info!(version = %state.version, "Application state initialized");

    // 전역 종료 토큰 (백그라운드 작업과 서버가 공유)
    let shutdown_token = CancellationToken::new();

    let scheduler = build_scheduler(&config, refresh, history)?;
    let job_handles = scheduler.start(shutdown_token.clone())?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("잘못된 서버 주소: {}:{}", config.server.host, config.server.port))?;

    let app = create_router(state);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_token.clone()))
        .await?;

    info!("Server shutdown initiated, cleaning up...");
    shutdown_token.cancel();

    // 진행 중인 작업 종료 대기 (최대 10초)
    let cleanup = tokio::time::timeout(
        Duration::from_secs(10),
        futures::future::join_all(job_handles),
    )
    .await;

    if cleanup.is_err() {
        warn!("Cleanup timeout, forcing shutdown");
    }

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료 토큰을 취소합니다.
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
        _ = shutdown_token.cancelled() => {}
    }

    // 모든 백그라운드 작업에 종료 시그널 전파
    shutdown_token.cancel();
    info!("Shutdown signal propagated to background tasks");
}
