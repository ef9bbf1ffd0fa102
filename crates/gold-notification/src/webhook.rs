//! 채팅 웹훅 알림 서비스.
//!
//! Synology Chat incoming webhook 형식으로 메시지를 전송합니다.
//! 본문은 `application/x-www-form-urlencoded`이며 `payload` 필드에 `{"text": ...}` JSON을 담습니다.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

use gold_core::NotificationConfig;

use crate::types::{NotificationError, NotificationResult, NotificationSender};

/// 웹훅 전송 설정.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// 웹훅 URL (토큰 포함)
    pub url: String,
    /// 전송 활성화 여부
    pub enabled: bool,
    /// 요청 타임아웃
    pub timeout: Duration,
}

impl WebhookConfig {
    /// 새 웹훅 설정을 생성합니다.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            enabled: true,
            timeout: Duration::from_secs(10),
        }
    }
}

impl From<&NotificationConfig> for WebhookConfig {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            url: config.webhook_url.trim().to_string(),
            enabled: config.enabled,
            timeout: config.timeout(),
        }
    }
}

/// 채팅 웹훅 전송기.
pub struct ChatWebhookSender {
    config: WebhookConfig,
    client: reqwest::Client,
}

impl ChatWebhookSender {
    /// 새 웹훅 전송기를 생성합니다.
    pub fn new(config: WebhookConfig) -> NotificationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotificationError::InvalidConfig(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl NotificationSender for ChatWebhookSender {
    async fn send_text(&self, text: &str) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Webhook notifications are disabled, skipping");
            return Ok(());
        }

        let payload = serde_json::to_string(&serde_json::json!({ "text": text }))?;

        debug!("Sending webhook notification");

        let response = self
            .client
            .post(&self.config.url)
            .form(&[("payload", payload)])
            .send()
            .await?;

        // 200 이외의 상태 코드(다른 2xx 포함)는 실패로 취급
        if response.status() == StatusCode::OK {
            info!("Webhook notification sent successfully");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // 실패 로그는 NotificationManager가 한 번만 남김
            debug!(status = %status, body = %body, "Webhook responded with non-200 status");
            Err(NotificationError::SendFailed(format!("HTTP {}: {}", status, body)))
        }
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.url.is_empty()
    }

    fn name(&self) -> &str {
        "chat_webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn sender(url: String) -> ChatWebhookSender {
        ChatWebhookSender::new(WebhookConfig::new(url)).unwrap()
    }

    #[tokio::test]
    async fn test_send_form_encoded_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/webapi/entry.cgi")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::UrlEncoded(
                "payload".to_string(),
                r#"{"text":"[台銀黃金報價] 09:01\n存摺賣出: 2,345"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let result = sender(format!("{}/webapi/entry.cgi", server.url()))
            .send_text("[台銀黃金報價] 09:01\n存摺賣出: 2,345")
            .await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(204)
            .create_async()
            .await;

        let err = sender(format!("{}/hook", server.url()))
            .send_text("hello")
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::SendFailed(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = sender(format!("{}/hook", server.url()))
            .send_text("hello")
            .await
            .unwrap_err();

        // 관리자가 남기는 단일 에러 로그에 상태와 본문이 모두 담겨야 함
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let err = sender("http://127.0.0.1:1/hook".to_string())
            .send_text("hello")
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_empty_url_is_disabled() {
        let sender = sender(String::new());
        assert!(!sender.is_enabled());
        // 비활성 전송기는 요청 없이 성공
        assert!(sender.send_text("hello").await.is_ok());
    }

    #[test]
    fn test_config_from_settings() {
        let settings = NotificationConfig {
            enabled: true,
            webhook_url: "  https://nas.example.com/webapi/entry.cgi  ".to_string(),
            timeout_secs: 3,
        };
        let config = WebhookConfig::from(&settings);
        assert_eq!(config.url, "https://nas.example.com/webapi/entry.cgi");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
