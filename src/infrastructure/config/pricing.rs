//! Price selection configuration.

use serde::Deserialize;

use crate::domain::PriceFallback;

/// Which resale fields are consulted, and in what order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    /// Ordered field names, e.g. `["recent_average_price", "lowest_price"]`.
    #[serde(default)]
    pub fallback: PriceFallback,
}
