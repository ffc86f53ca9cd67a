//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::roblox::RobloxClient;
use crate::application::cache::PriceCache;
use crate::application::valuation::ValuationEngine;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{InventorySource, PriceSource};

/// Build the process-wide price cache.
#[must_use]
pub fn build_price_cache(config: &Config) -> Arc<PriceCache> {
    info!(
        ttl_secs = config.cache.ttl_secs,
        max_entries = ?config.cache.max_entries,
        "Price cache configured"
    );
    Arc::new(config.cache.build())
}

/// Build a valuation engine backed by the Roblox APIs.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_engine(config: &Config, cache: Arc<PriceCache>) -> Result<ValuationEngine> {
    let client = Arc::new(RobloxClient::from_config(&config.roblox)?);
    let inventory: Arc<dyn InventorySource> = client.clone();
    let prices: Arc<dyn PriceSource> = client;

    info!(
        inventory_url = %config.roblox.inventory_url,
        economy_url = %config.roblox.economy_url,
        page_size = config.roblox.page_size,
        "Valuation engine ready"
    );

    Ok(ValuationEngine::from_parts(
        inventory,
        prices,
        cache,
        config.engine_settings(),
    ))
}
