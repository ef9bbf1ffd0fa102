//! # Gold Core
//!
//! 금 시세 감시 서비스의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 시세 레코드(`PriceRecord`) 및 과거 시세(`HistorySeries`)
//! - 시세/추세 제공자 trait
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라
//! - 천 단위 구분 기호 숫자 처리

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod logging;

pub use crate::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
