//! 과거 시세 캐시.

pub mod history;

pub use history::{HistoricalLoader, HistoryStore};
