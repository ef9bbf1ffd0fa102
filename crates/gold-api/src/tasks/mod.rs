//! 백그라운드 태스크 모듈.
//!
//! 서버 실행 중 주기적으로 실행되는 작업을 요청 처리와 분리된 tokio 태스크로 돌립니다.
//! - 시세 갱신: 고정 간격
//! - 일일 알림: 로컬 시간대 기준 고정 시각
//! - 시작 직후 1회 작업

pub mod scheduler;

pub use scheduler::{duration_until_next, Job, Scheduler, SchedulerError, Trigger};
