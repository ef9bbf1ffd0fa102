//! 금 시세 HTTP API 및 백그라운드 스케줄러.
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`services`]: 시세 캐시와 갱신 오케스트레이터
//! - [`tasks`]: 이름 있는 백그라운드 작업 스케줄러
//! - [`routes`]: REST API 엔드포인트

pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod tasks;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApiErrorResponse;
pub use routes::create_api_router;
pub use services::{PriceCache, RefreshService};
pub use state::AppState;
pub use tasks::{Job, Scheduler, SchedulerError, Trigger};
