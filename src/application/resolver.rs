//! Cache-first price resolution for a single asset.

use std::sync::Arc;

use tracing::{debug, warn};

use super::cache::PriceCache;
use crate::domain::{AssetId, PriceFallback};
use crate::error::PriceResolutionFailure;
use crate::port::PriceSource;

/// Resolves asset prices through the shared [`PriceCache`].
///
/// A fresh cache hit never touches the price source. A miss issues exactly
/// one upstream lookup; a successful lookup is written back, a failed one
/// leaves the cache untouched.
pub struct PriceResolver {
    source: Arc<dyn PriceSource>,
    cache: Arc<PriceCache>,
    fallback: PriceFallback,
}

impl PriceResolver {
    #[must_use]
    pub fn new(
        source: Arc<dyn PriceSource>,
        cache: Arc<PriceCache>,
        fallback: PriceFallback,
    ) -> Self {
        Self {
            source,
            cache,
            fallback,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<PriceCache> {
        &self.cache
    }

    /// Current price of `asset_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceResolutionFailure`] when the upstream lookup fails.
    pub async fn resolve(&self, asset_id: AssetId) -> Result<u64, PriceResolutionFailure> {
        if let Some(price) = self.cache.get(asset_id) {
            debug!(asset_id = %asset_id, price, "Price cache hit");
            return Ok(price);
        }

        match self.source.resale_data(asset_id).await {
            Ok(data) => {
                let price = self.fallback.pick(&data);
                debug!(
                    asset_id = %asset_id,
                    price,
                    source = self.source.source_name(),
                    "Resolved price"
                );
                self.cache.put(asset_id, price);
                Ok(price)
            }
            Err(source) => {
                warn!(asset_id = %asset_id, error = %source, "Price lookup failed");
                Err(PriceResolutionFailure { asset_id, source })
            }
        }
    }
}
