//! Owned inventory items and quantity grouping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::AssetId;

/// One owned unit of a collectible.
///
/// Several items may share an `asset_id`; each is a separate copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedItem {
    pub asset_id: AssetId,
    /// Per-copy identifier (`userAssetId` upstream), when reported.
    pub instance_id: Option<u64>,
    pub name: Option<String>,
}

impl OwnedItem {
    #[must_use]
    pub fn new(asset_id: impl Into<AssetId>) -> Self {
        Self {
            asset_id: asset_id.into(),
            instance_id: None,
            name: None,
        }
    }
}

/// Count of owned units per distinct asset.
///
/// Iterates in ascending asset order so valuation output and logs are
/// reproducible. The counts always sum to the number of items grouped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityMap {
    counts: BTreeMap<AssetId, u32>,
}

impl QuantityMap {
    /// Group items by asset id.
    #[must_use]
    pub fn from_items(items: &[OwnedItem]) -> Self {
        items.iter().collect()
    }

    /// Units owned of one asset (zero when not owned).
    #[must_use]
    pub fn quantity(&self, asset_id: AssetId) -> u32 {
        self.counts.get(&asset_id).copied().unwrap_or(0)
    }

    /// Number of distinct assets.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total owned units across all assets.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(asset, quantity)` pairs in ascending asset order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetId, u32)> + '_ {
        self.counts.iter().map(|(&asset, &count)| (asset, count))
    }
}

impl<'a> FromIterator<&'a OwnedItem> for QuantityMap {
    fn from_iter<I: IntoIterator<Item = &'a OwnedItem>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for item in iter {
            *counts.entry(item.asset_id).or_insert(0u32) += 1;
        }
        Self { counts }
    }
}
