//! 금 시세 감시를 위한 도메인 모델.

mod history;
mod price;
mod provider;

pub use history::*;
pub use price::*;
pub use provider::*;
