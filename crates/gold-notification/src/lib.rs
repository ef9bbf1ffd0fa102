//! # Gold Notification
//!
//! 금 시세 알림 서비스.
//!
//! 지원 채널:
//! - 채팅 웹훅 (Synology Chat incoming webhook 형식)

pub mod manager;
pub mod message;
pub mod types;
pub mod webhook;

pub use manager::*;
pub use message::*;
pub use types::*;
pub use webhook::*;
