//! Runtime caches used by application services.
//!
//! - [`price::PriceCache`]: resolved asset prices with TTL-based expiration

pub mod price;

pub use price::{CacheEntry, PriceCache, DEFAULT_PRICE_TTL};
