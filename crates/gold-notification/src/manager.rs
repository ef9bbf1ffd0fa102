//! 여러 전송기를 관리하는 알림 관리자.

use chrono::Utc;
use chrono_tz::Tz;
use tracing::{debug, error, info};

use gold_core::PriceRecord;

use crate::message::format_price_message;
use crate::types::NotificationSender;

/// 알림 관리자.
///
/// 전송 실패는 로그만 남기고 호출자에게 전파하지 않습니다.
pub struct NotificationManager {
    senders: Vec<Box<dyn NotificationSender>>,
    tz: Tz,
}

impl NotificationManager {
    /// 새 알림 관리자를 생성합니다.
    ///
    /// `tz`는 게시 시각이 없는 레코드의 대체 시각에 사용됩니다.
    pub fn new(tz: Tz) -> Self {
        Self {
            senders: Vec::new(),
            tz,
        }
    }

    /// 알림 전송기를 추가합니다.
    pub fn add_sender<S: NotificationSender + 'static>(&mut self, sender: S) {
        self.senders.push(Box::new(sender));
    }

    /// 활성화된 전송기가 하나라도 있는지 확인합니다.
    pub fn has_active_sender(&self) -> bool {
        self.senders.iter().any(|s| s.is_enabled())
    }

    /// 활성화된 모든 전송기로 텍스트를 전송합니다.
    ///
    /// 전송기마다 정확히 한 번 시도하며 재시도하지 않습니다.
    pub async fn notify_text(&self, text: &str) {
        let mut delivered = 0usize;

        for sender in &self.senders {
            if !sender.is_enabled() {
                continue;
            }

            match sender.send_text(text).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    error!(sender = sender.name(), error = %e, "알림 전송 실패");
                }
            }
        }

        if delivered == 0 {
            debug!("전송된 알림 없음");
        }
    }

    /// 시세 레코드를 메시지로 포맷하여 전송합니다.
    pub async fn notify_price(&self, record: &PriceRecord) {
        let message = format_price_message(record, Utc::now().with_timezone(&self.tz));
        info!(timestamp = ?record.timestamp, "시세 알림 전송");
        self.notify_text(&message).await;
    }
}
