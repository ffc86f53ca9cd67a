//! Valuation use case: fetch, group, resolve, sum.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{timeout_at, Instant};
use tracing::{debug, info};

use super::cache::PriceCache;
use super::inventory::{FetchSettings, InventoryFetcher};
use super::resolver::PriceResolver;
use crate::domain::{AssetId, ItemValuation, PriceFallback, QuantityMap, UserId, ValuationResult};
use crate::error::{FetchError, PriceResolutionFailure, Result, UpstreamError};
use crate::port::{InventorySource, PriceSource};

/// Settings for one [`ValuationEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub fetch: FetchSettings,
    pub fallback: PriceFallback,
    /// Overall budget for one valuation, if any.
    pub deadline: Option<Duration>,
}

/// Computes a user's RAP.
///
/// Each call runs its own pipeline. Prices are resolved one asset at a time:
/// the price feed is shared and rate limited, so a valuation never bursts
/// requests at it. Separate valuations may run concurrently and share the
/// engine's [`PriceCache`].
pub struct ValuationEngine {
    fetcher: InventoryFetcher,
    resolver: PriceResolver,
    deadline: Option<Duration>,
}

impl ValuationEngine {
    #[must_use]
    pub fn new(fetcher: InventoryFetcher, resolver: PriceResolver) -> Self {
        Self {
            fetcher,
            resolver,
            deadline: None,
        }
    }

    /// Wire an engine from its ports and a shared cache.
    #[must_use]
    pub fn from_parts(
        inventory: Arc<dyn InventorySource>,
        prices: Arc<dyn PriceSource>,
        cache: Arc<PriceCache>,
        settings: EngineSettings,
    ) -> Self {
        let fetcher = InventoryFetcher::new(inventory, settings.fetch);
        let resolver = PriceResolver::new(prices, cache, settings.fallback);
        Self {
            fetcher,
            resolver,
            deadline: settings.deadline,
        }
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<PriceCache> {
        self.resolver.cache()
    }

    /// Valuate the user identified by `user_id`.
    ///
    /// The id is validated before any upstream request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::error::Error::Validation) for a
    /// malformed id and [`Error::Fetch`](crate::error::Error::Fetch) when the
    /// inventory could not be retrieved in full. Per-asset price failures do
    /// not fail the call; they are listed in the result.
    pub async fn valuate(&self, user_id: &str) -> Result<ValuationResult> {
        let user_id = UserId::parse(user_id)?;
        self.valuate_user(user_id).await
    }

    /// Valuate an already validated user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`](crate::error::Error::Fetch) when the inventory
    /// could not be retrieved in full.
    pub async fn valuate_user(&self, user_id: UserId) -> Result<ValuationResult> {
        let deadline = self.deadline.map(|budget| Instant::now() + budget);

        let items = match deadline {
            Some(at) => timeout_at(at, self.fetcher.fetch_all(user_id))
                .await
                .map_err(|_| FetchError::DeadlineExceeded)??,
            None => self.fetcher.fetch_all(user_id).await?,
        };

        let quantities = QuantityMap::from_items(&items);
        info!(
            user_id = %user_id,
            items = items.len(),
            distinct = quantities.distinct(),
            "Resolving prices"
        );

        let mut result = ValuationResult::new(user_id, quantities.total_units());
        for (asset_id, quantity) in quantities.iter() {
            match self.resolve_before(asset_id, deadline).await {
                Ok(price) => {
                    let line = ItemValuation::new(asset_id, quantity, price);
                    debug!(
                        user_id = %user_id,
                        asset_id = %asset_id,
                        quantity,
                        price,
                        subtotal = line.subtotal,
                        "Valued asset"
                    );
                    result.push(line);
                }
                Err(failure) => result.record_failure(failure.asset_id),
            }
        }

        info!(
            user_id = %user_id,
            total = result.total,
            distinct = quantities.distinct(),
            failed = result.failed_items.len(),
            "Valuation complete"
        );
        Ok(result)
    }

    async fn resolve_before(
        &self,
        asset_id: AssetId,
        deadline: Option<Instant>,
    ) -> std::result::Result<u64, PriceResolutionFailure> {
        let timed_out = PriceResolutionFailure {
            asset_id,
            source: UpstreamError::Timeout,
        };
        match deadline {
            Some(at) if Instant::now() >= at => Err(timed_out),
            Some(at) => timeout_at(at, self.resolver.resolve(asset_id))
                .await
                .unwrap_or(Err(timed_out)),
            None => self.resolver.resolve(asset_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use crate::testkit::inventory::ScriptedInventory;
    use crate::testkit::price::ScriptedPrices;

    fn engine(inventory: ScriptedInventory, prices: ScriptedPrices) -> ValuationEngine {
        ValuationEngine::from_parts(
            Arc::new(inventory),
            Arc::new(prices),
            Arc::new(PriceCache::default()),
            EngineSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_sums_quantity_times_price() {
        let engine = engine(
            ScriptedInventory::new().with_page(&[1, 1, 2], None),
            ScriptedPrices::new().with_price(1, 10).with_price(2, 5),
        );

        let result = engine.valuate("42").await.unwrap();

        assert_eq!(result.total, 25);
        assert_eq!(result.item_count, 3);
        assert_eq!(
            result.per_item,
            vec![
                ItemValuation::new(AssetId::new(1), 2, 10),
                ItemValuation::new(AssetId::new(2), 1, 5),
            ]
        );
        assert!(result.is_complete());
    }

    #[tokio::test]
    async fn test_failed_price_is_skipped_and_reported() {
        let engine = engine(
            ScriptedInventory::new().with_page(&[1, 1, 2], None),
            ScriptedPrices::new()
                .with_price(1, 10)
                .with_error(2, UpstreamError::Status { status: 500 }),
        );

        let result = engine.valuate("42").await.unwrap();

        assert_eq!(result.total, 20);
        assert!(result.failed_items.contains(&AssetId::new(2)));
        assert_eq!(result.per_item.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_user_makes_no_requests() {
        let inventory = Arc::new(ScriptedInventory::new());
        let prices = Arc::new(ScriptedPrices::new());
        let engine = ValuationEngine::from_parts(
            inventory.clone(),
            prices.clone(),
            Arc::new(PriceCache::default()),
            EngineSettings::default(),
        );

        let err = engine.valuate("abc").await.unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::NotNumeric { .. })
        ));
        assert_eq!(inventory.request_count(), 0);
        assert_eq!(prices.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let prices = Arc::new(ScriptedPrices::new().with_price(1, 10));
        let engine = ValuationEngine::from_parts(
            Arc::new(ScriptedInventory::new().with_error(UpstreamError::Timeout)),
            prices.clone(),
            Arc::new(PriceCache::default()),
            EngineSettings::default(),
        );

        let err = engine.valuate("42").await.unwrap_err();

        assert!(matches!(
            err,
            Error::Fetch(FetchError::Upstream {
                page: 1,
                source: UpstreamError::Timeout
            })
        ));
        assert_eq!(prices.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_resolves_in_ascending_order_and_uses_cache() {
        let prices = Arc::new(ScriptedPrices::new().with_price(5, 1).with_price(9, 2));
        let cache = Arc::new(PriceCache::default());
        let engine = ValuationEngine::from_parts(
            Arc::new(ScriptedInventory::repeating(&[9, 5, 9])),
            prices.clone(),
            cache,
            EngineSettings::default(),
        );

        let first = engine.valuate("7").await.unwrap();
        let second = engine.valuate("7").await.unwrap();

        let order: Vec<u64> = first.per_item.iter().map(|l| l.asset_id.get()).collect();
        assert_eq!(order, vec![5, 9]);
        assert_eq!(first.total, 5);
        assert_eq!(second.total, 5);
        assert_eq!(prices.calls_for(5), 1);
        assert_eq!(prices.calls_for(9), 1);
    }

    #[tokio::test]
    async fn test_empty_inventory() {
        let engine = engine(ScriptedInventory::new(), ScriptedPrices::new());

        let result = engine.valuate("42").await.unwrap();

        assert_eq!(result.total, 0);
        assert!(result.per_item.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_on_inventory() {
        let engine = engine(
            ScriptedInventory::new()
                .with_page(&[1], None)
                .with_delay(Duration::from_secs(10)),
            ScriptedPrices::new().with_price(1, 10),
        )
        .with_deadline(Duration::from_secs(1));

        let err = engine.valuate("42").await.unwrap_err();

        assert!(matches!(err, Error::Fetch(FetchError::DeadlineExceeded)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_on_prices_marks_failures() {
        let engine = engine(
            ScriptedInventory::new().with_page(&[1, 2], None),
            ScriptedPrices::new()
                .with_price(1, 10)
                .with_price(2, 20)
                .with_delay(Duration::from_secs(3)),
        )
        .with_deadline(Duration::from_secs(5));

        let result = engine.valuate("42").await.unwrap();

        // Asset 1 resolves at t=3s; asset 2 would finish at t=6s.
        assert_eq!(result.total, 10);
        assert!(result.failed_items.contains(&AssetId::new(2)));
    }
}
