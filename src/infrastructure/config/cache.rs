//! Price cache configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::cache::{PriceCache, DEFAULT_PRICE_TTL};

/// Price cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds a resolved price stays valid.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Upper bound on cached prices. Unbounded when unset.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

const fn default_ttl_secs() -> u64 {
    DEFAULT_PRICE_TTL.as_secs()
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Build the process-wide cache described by this config.
    #[must_use]
    pub fn build(&self) -> PriceCache {
        match self.max_entries {
            Some(max) => PriceCache::bounded(self.ttl(), max),
            None => PriceCache::new(self.ttl()),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: None,
        }
    }
}
