//! 페이지 HTML 수집.
//!
//! 파서는 순수 함수로 분리되어 있고, 네트워크 접근은 `HtmlSource` 뒤에 둡니다.
//! 테스트에서는 호출 횟수를 세는 스텁으로 교체합니다.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{DataError, Result};

/// HTML 문서를 가져오는 소스.
#[async_trait]
pub trait HtmlSource: Send + Sync {
    /// URL의 본문을 문자열로 반환합니다.
    ///
    /// # Errors
    ///
    /// - `DataError::FetchError`: 연결 실패, 타임아웃
    /// - `DataError::HttpStatus`: 2xx 이외의 상태 코드
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// reqwest 기반 HTML 클라이언트.
///
/// 재시도 없이 클라이언트 단위 타임아웃 하나만 적용합니다.
#[derive(Debug, Clone)]
pub struct HttpHtmlClient {
    client: Client,
}

impl HttpHtmlClient {
    /// 타임아웃과 User-Agent를 지정하여 생성
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| DataError::FetchError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HtmlSource for HttpHtmlClient {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!(url = url, "페이지 요청");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
