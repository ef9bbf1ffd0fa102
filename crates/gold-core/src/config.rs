//! 설정 관리.
//!
//! 기본값 → TOML 파일 → 환경 변수(`GOLD_` 접두사, `__` 구분자) 순서로 덮어씁니다.
//!
//! ```text
//! GOLD_SERVER__PORT=5001
//! GOLD_NOTIFICATION__WEBHOOK_URL=https://nas.example.com/webapi/entry.cgi?...
//! GOLD_SCHEDULE__DAILY_NOTIFY_TIME=08:00
//! ```

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{GoldError, GoldResult};

/// 설정 파일 경로를 지정하는 환경 변수.
pub const CONFIG_PATH_ENV: &str = "GOLD_CONFIG";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 스크래퍼 설정
    #[serde(default)]
    pub scraper: ScraperConfig,
    /// 스케줄 설정
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// 알림 설정
    #[serde(default)]
    pub notification: NotificationConfig,
    /// 국제 금값 추세 설정
    #[serde(default)]
    pub trend: TrendConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

/// 은행 페이지 스크래퍼 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    /// 실시간 시세 페이지 URL
    pub quote_url: String,
    /// 과거 시세(최근 1년) 페이지 URL
    pub history_url: String,
    /// 요청 User-Agent
    pub user_agent: String,
    /// 시세 페이지 타임아웃 (초)
    pub quote_timeout_secs: u64,
    /// 과거 시세 페이지 타임아웃 (초)
    pub history_timeout_secs: u64,
    /// 과거 시세 캐시 파일 경로
    pub history_cache_path: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            quote_url: "https://rate.bot.com.tw/gold?Lang=zh-TW".to_string(),
            history_url: "https://rate.bot.com.tw/gold/chart/ltm/TWD".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            quote_timeout_secs: 10,
            history_timeout_secs: 15,
            history_cache_path: "history_data.json".to_string(),
        }
    }
}

impl ScraperConfig {
    /// 시세 페이지 타임아웃을 Duration으로 반환
    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.quote_timeout_secs)
    }

    /// 과거 시세 페이지 타임아웃을 Duration으로 반환
    pub fn history_timeout(&self) -> Duration {
        Duration::from_secs(self.history_timeout_secs)
    }
}

/// 스케줄 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// 주기적 시세 갱신 간격 (분)
    pub refresh_interval_minutes: u64,
    /// 일일 알림 시각 (HH:MM, 로컬 시간대 기준)
    pub daily_notify_time: String,
    /// 로컬 시간대 (IANA 이름)
    pub timezone: String,
    /// 시작 직후 1회 갱신 + 알림 실행 여부
    pub notify_on_startup: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: 60,
            daily_notify_time: "08:00".to_string(),
            timezone: "Asia/Taipei".to_string(),
            notify_on_startup: true,
        }
    }
}

impl ScheduleConfig {
    /// 갱신 간격을 Duration으로 반환
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_minutes.max(1) * 60)
    }

    /// 일일 알림 시각 파싱
    pub fn daily_notify_at(&self) -> GoldResult<NaiveTime> {
        NaiveTime::parse_from_str(self.daily_notify_time.trim(), "%H:%M").map_err(|e| {
            GoldError::Config(format!(
                "daily_notify_time 형식 오류 ({}): {}",
                self.daily_notify_time, e
            ))
        })
    }

    /// 시간대 파싱
    pub fn tz(&self) -> GoldResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| GoldError::Config(format!("알 수 없는 시간대 ({}): {}", self.timezone, e)))
    }
}

/// 웹훅 알림 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// 활성화 여부
    pub enabled: bool,
    /// 채팅 웹훅 URL (비어 있으면 전송하지 않음)
    #[serde(default)]
    pub webhook_url: String,
    /// 전송 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webhook_url: String::new(),
            timeout_secs: 10,
        }
    }
}

impl NotificationConfig {
    /// 전송 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 국제 금값 추세 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrendConfig {
    /// 활성화 여부
    pub enabled: bool,
    /// Yahoo Finance 심볼
    pub symbol: String,
    /// 조회 범위 (MA20, RSI14 계산에 충분해야 함)
    pub range: String,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            symbol: "GC=F".to_string(),
            range: "2mo".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> GoldResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("GOLD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let loaded: AppConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// `GOLD_CONFIG` 또는 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> GoldResult<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// 값 검증 (시각, 시간대 형식).
    pub fn validate(&self) -> GoldResult<()> {
        self.schedule.daily_notify_at()?;
        self.schedule.tz()?;
        Ok(())
    }
}
