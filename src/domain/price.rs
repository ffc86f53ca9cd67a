//! Resale price fields and the fallback rule that turns them into one price.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Price fields a resale-data response may carry. Any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResaleData {
    pub recent_average_price: Option<u64>,
    pub lowest_price: Option<u64>,
    pub average_price: Option<u64>,
    pub price_in_robux: Option<u64>,
}

impl ResaleData {
    #[must_use]
    pub fn field(&self, field: PriceField) -> Option<u64> {
        match field {
            PriceField::RecentAveragePrice => self.recent_average_price,
            PriceField::LowestPrice => self.lowest_price,
            PriceField::AveragePrice => self.average_price,
            PriceField::PriceInRobux => self.price_in_robux,
        }
    }
}

/// A single upstream price field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    RecentAveragePrice,
    LowestPrice,
    AveragePrice,
    PriceInRobux,
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RecentAveragePrice => "recent_average_price",
            Self::LowestPrice => "lowest_price",
            Self::AveragePrice => "average_price",
            Self::PriceInRobux => "price_in_robux",
        };
        f.write_str(name)
    }
}

/// Ordered list of fields consulted when picking a price.
///
/// The first field that is present and non-zero wins. A zero is treated the
/// same as a missing value, so an item with no recent sales falls through to
/// the next field. When nothing qualifies the price is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceFallback(Vec<PriceField>);

impl PriceFallback {
    #[must_use]
    pub fn new(order: Vec<PriceField>) -> Self {
        Self(order)
    }

    #[must_use]
    pub fn fields(&self) -> &[PriceField] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pick a price from `data`.
    #[must_use]
    pub fn pick(&self, data: &ResaleData) -> u64 {
        self.0
            .iter()
            .filter_map(|&field| data.field(field))
            .find(|&price| price > 0)
            .unwrap_or(0)
    }
}

impl Default for PriceFallback {
    fn default() -> Self {
        Self(vec![PriceField::RecentAveragePrice, PriceField::LowestPrice])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_recent_average() {
        let data = ResaleData {
            recent_average_price: Some(1200),
            lowest_price: Some(900),
            ..Default::default()
        };
        assert_eq!(PriceFallback::default().pick(&data), 1200);
    }

    #[test]
    fn test_zero_falls_through() {
        let data = ResaleData {
            recent_average_price: Some(0),
            lowest_price: Some(900),
            ..Default::default()
        };
        assert_eq!(PriceFallback::default().pick(&data), 900);
    }

    #[test]
    fn test_missing_falls_through() {
        let data = ResaleData {
            lowest_price: Some(75),
            ..Default::default()
        };
        assert_eq!(PriceFallback::default().pick(&data), 75);
    }

    #[test]
    fn test_nothing_present_is_zero() {
        let data = ResaleData {
            average_price: Some(500),
            ..Default::default()
        };
        assert_eq!(PriceFallback::default().pick(&data), 0);
    }

    #[test]
    fn test_custom_order() {
        let fallback = PriceFallback::new(vec![PriceField::AveragePrice, PriceField::PriceInRobux]);
        let data = ResaleData {
            recent_average_price: Some(10),
            price_in_robux: Some(40),
            ..Default::default()
        };
        assert_eq!(fallback.pick(&data), 40);
    }

    #[test]
    fn test_deserializes_from_names() {
        let fallback: PriceFallback =
            serde_json::from_str(r#"["lowest_price", "recent_average_price"]"#).unwrap();
        assert_eq!(
            fallback.fields(),
            &[PriceField::LowestPrice, PriceField::RecentAveragePrice]
        );
    }
}
