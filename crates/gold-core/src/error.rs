//! 시세 감시 시스템의 에러 타입.
//!
//! 갱신 경로에서 발생하는 실패를 네 가지로 분류합니다.
//! 각 분류마다 전파 정책이 다릅니다 (수집/파싱 실패는 캐시 유지, 알림 실패는 로그 후 폐기).

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum GoldError {
    /// 네트워크 에러 (연결 실패, 타임아웃, 2xx 이외 상태 코드)
    #[error("수집 실패: {0}")]
    Fetch(String),

    /// 구조 파싱 에러 (마커 누락, 전체 필드 비어 있음)
    #[error("파싱 실패: {0}")]
    Parse(String),

    /// 웹훅 전송 에러
    #[error("알림 실패: {0}")]
    Notify(String),

    /// 캐시 파일 읽기/쓰기 에러
    #[error("캐시 입출력 실패: {0}")]
    CacheIo(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type GoldResult<T> = Result<T, GoldError>;

impl GoldError {
    /// 업스트림 수집 단계에서 발생한 에러인지 확인합니다.
    ///
    /// 이 경우 기존 캐시를 그대로 유지해야 합니다.
    pub fn is_upstream(&self) -> bool {
        matches!(self, GoldError::Fetch(_) | GoldError::Parse(_))
    }
}

impl From<serde_json::Error> for GoldError {
    fn from(err: serde_json::Error) -> Self {
        GoldError::CacheIo(err.to_string())
    }
}

impl From<std::io::Error> for GoldError {
    fn from(err: std::io::Error) -> Self {
        GoldError::CacheIo(err.to_string())
    }
}

impl From<config::ConfigError> for GoldError {
    fn from(err: config::ConfigError) -> Self {
        GoldError::Config(err.to_string())
    }
}
