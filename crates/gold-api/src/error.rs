//! API 에러 응답 타입.
//!
//! 모든 엔드포인트에서 동일한 JSON 에러 형식을 사용합니다.
//!
//! ```json
//! {
//!   "code": "NOT_FOUND",
//!   "message": "요청한 경로를 찾을 수 없습니다",
//!   "timestamp": 1704153600
//! }
//! ```

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// 통합 API 에러 응답.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 메시지
    pub message: String,
    /// 에러 발생 시각 (Unix timestamp)
    pub timestamp: i64,
    /// HTTP 메서드
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// 요청 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiErrorResponse {
    /// 타임스탬프를 포함한 에러 응답 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp(),
            method: None,
            path: None,
        }
    }

    /// 요청 정보(메서드, 경로)를 추가합니다.
    #[must_use]
    pub fn with_request_info(mut self, method: &Method, uri: &Uri) -> Self {
        self.method = Some(method.to_string());
        self.path = Some(uri.path().to_string());
        self
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 등록되지 않은 경로에 대한 404 응답.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    let body = ApiErrorResponse::new("NOT_FOUND", "요청한 경로를 찾을 수 없습니다")
        .with_request_info(&method, &uri);
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert!(error.timestamp > 0);
        assert!(error.path.is_none());
    }

    #[test]
    fn test_json_shape_without_request_info() {
        let error = ApiErrorResponse::new("NOT_FOUND", "Resource not found");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Resource not found");
        assert!(json["timestamp"].is_i64());
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("method"));
        assert!(!object.contains_key("path"));
        assert!(!object.contains_key("details"));
    }

    #[test]
    fn test_with_request_info() {
        let uri: Uri = "/api/unknown?x=1".parse().unwrap();
        let error = ApiErrorResponse::new("NOT_FOUND", "missing").with_request_info(&Method::GET, &uri);

        assert_eq!(error.method.as_deref(), Some("GET"));
        assert_eq!(error.path.as_deref(), Some("/api/unknown"));
        assert_eq!(error.to_string(), "[NOT_FOUND] missing");
    }
}
