//! 시세 캐시와 갱신 서비스.

pub mod price_cache;
pub mod refresh;

pub use price_cache::PriceCache;
pub use refresh::RefreshService;
