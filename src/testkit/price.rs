//! Mock [`PriceSource`] with scripted per-asset responses.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{AssetId, ResaleData};
use crate::error::UpstreamError;
use crate::port::PriceSource;

/// A mock price feed.
///
/// Assets without a scripted response answer with a 404 status. Calls are
/// counted per asset so tests can tell cache hits from upstream lookups.
pub struct ScriptedPrices {
    responses: Mutex<HashMap<AssetId, Result<ResaleData, UpstreamError>>>,
    calls: Mutex<HashMap<AssetId, usize>>,
    total_calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedPrices {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            total_calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Answer `asset_id` with a recent average price.
    pub fn with_price(self, asset_id: u64, price: u64) -> Self {
        self.with_data(
            asset_id,
            ResaleData {
                recent_average_price: Some(price),
                ..Default::default()
            },
        )
    }

    /// Answer `asset_id` with explicit resale data.
    pub fn with_data(self, asset_id: u64, data: ResaleData) -> Self {
        self.responses.lock().insert(AssetId::new(asset_id), Ok(data));
        self
    }

    /// Fail every lookup of `asset_id`.
    pub fn with_error(self, asset_id: u64, error: UpstreamError) -> Self {
        self.responses
            .lock()
            .insert(AssetId::new(asset_id), Err(error));
        self
    }

    /// Sleep before answering each lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the scripted price of an asset after construction.
    pub fn set_price(&self, asset_id: u64, price: u64) {
        self.responses.lock().insert(
            AssetId::new(asset_id),
            Ok(ResaleData {
                recent_average_price: Some(price),
                ..Default::default()
            }),
        );
    }

    /// Number of upstream lookups for one asset.
    pub fn calls_for(&self, asset_id: u64) -> usize {
        self.calls
            .lock()
            .get(&AssetId::new(asset_id))
            .copied()
            .unwrap_or(0)
    }

    /// Number of upstream lookups across all assets.
    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedPrices {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for ScriptedPrices {
    async fn resale_data(&self, asset_id: AssetId) -> Result<ResaleData, UpstreamError> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().entry(asset_id).or_insert(0) += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .get(&asset_id)
            .cloned()
            .unwrap_or(Err(UpstreamError::Status { status: 404 }))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
