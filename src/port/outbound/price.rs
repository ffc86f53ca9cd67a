//! Price port: resale data for a single asset.

use async_trait::async_trait;

use crate::domain::{AssetId, ResaleData};
use crate::error::UpstreamError;

/// Source of per-asset resale price data.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the raw price fields for one asset.
    async fn resale_data(&self, asset_id: AssetId) -> Result<ResaleData, UpstreamError>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}
