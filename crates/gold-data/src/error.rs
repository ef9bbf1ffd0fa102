//! 데이터 모듈 오류 타입.

use thiserror::Error;

use gold_core::GoldError;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 가져오기 오류 (연결 실패, 타임아웃)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 2xx 이외의 응답 상태 코드
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 캐시 파일 오류
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::FetchError(format!("timeout: {}", err))
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::CacheError(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<DataError> for GoldError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::FetchError(_) | DataError::HttpStatus { .. } => {
                GoldError::Fetch(err.to_string())
            }
            DataError::ParseError(_) => GoldError::Parse(err.to_string()),
            DataError::CacheError(_) | DataError::SerializationError(_) => {
                GoldError::CacheIo(err.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_gold_error() {
        let status = DataError::HttpStatus {
            status: 503,
            url: "https://rate.bot.com.tw/gold".to_string(),
        };
        assert!(matches!(GoldError::from(status), GoldError::Fetch(_)));

        let parse = DataError::ParseError("no rows".to_string());
        assert!(matches!(GoldError::from(parse), GoldError::Parse(_)));

        let io = DataError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(matches!(GoldError::from(io), GoldError::CacheIo(_)));
    }
}
