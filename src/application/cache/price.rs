//! Shared price cache with TTL-on-read and an optional capacity bound.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::AssetId;

/// Default time-to-live for cached prices: one hour.
pub const DEFAULT_PRICE_TTL: Duration = Duration::from_secs(60 * 60);

/// A cached price and when it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub price: u64,
    pub recorded_at: Instant,
}

impl CacheEntry {
    /// Fresh while strictly younger than `ttl` at `now`.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.recorded_at) < ttl
    }
}

/// Thread-safe cache of resolved prices keyed by asset.
///
/// Constructed once per process and shared by handle between all valuation
/// requests. Staleness is only checked on read; nothing sweeps in the
/// background. Without `max_entries` the map grows with the number of
/// distinct assets ever priced.
#[derive(Debug)]
pub struct PriceCache {
    entries: RwLock<HashMap<AssetId, CacheEntry>>,
    ttl: Duration,
    max_entries: Option<usize>,
}

impl PriceCache {
    /// Create an unbounded cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: None,
        }
    }

    /// Create a cache holding at most `max_entries` prices.
    #[must_use]
    pub fn bounded(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: Some(max_entries.max(1)),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached price for `asset_id`, if present and fresh.
    #[must_use]
    pub fn get(&self, asset_id: AssetId) -> Option<u64> {
        self.get_at(asset_id, Instant::now())
    }

    /// Cached price as judged at `now`.
    #[must_use]
    pub fn get_at(&self, asset_id: AssetId, now: Instant) -> Option<u64> {
        let entries = self.entries.read();
        entries
            .get(&asset_id)
            .filter(|entry| entry.is_fresh(self.ttl, now))
            .map(|entry| entry.price)
    }

    /// Store a price, replacing any previous entry.
    pub fn put(&self, asset_id: AssetId, price: u64) {
        self.put_at(asset_id, price, Instant::now());
    }

    /// Store a price recorded at `at`.
    pub fn put_at(&self, asset_id: AssetId, price: u64, at: Instant) {
        let mut entries = self.entries.write();

        if let Some(cap) = self.max_entries {
            if entries.len() >= cap && !entries.contains_key(&asset_id) {
                let ttl = self.ttl;
                entries.retain(|_, entry| entry.is_fresh(ttl, at));

                if entries.len() >= cap {
                    let oldest = entries
                        .iter()
                        .min_by_key(|(_, entry)| entry.recorded_at)
                        .map(|(&asset, _)| asset);
                    if let Some(oldest) = oldest {
                        entries.remove(&oldest);
                        debug!(asset_id = %oldest, "Evicted oldest cached price");
                    }
                }
            }
        }

        entries.insert(
            asset_id,
            CacheEntry {
                price,
                recorded_at: at,
            },
        );
    }

    /// Drop every stale entry. Returns how many were removed.
    pub fn purge_stale(&self) -> usize {
        self.purge_stale_at(Instant::now())
    }

    /// Drop every entry stale at `now`.
    pub fn purge_stale_at(&self, now: Instant) -> usize {
        let ttl = self.ttl;
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(ttl, now));
        before - entries.len()
    }

    /// Number of entries held, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_TTL)
    }
}
