//! Valuation results and the wire shape returned to callers.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::{AssetId, UserId};
use crate::error::Error;

/// Valuation line for one distinct asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemValuation {
    pub asset_id: AssetId,
    pub quantity: u32,
    pub price: u64,
    pub subtotal: u64,
}

impl ItemValuation {
    #[must_use]
    pub fn new(asset_id: AssetId, quantity: u32, price: u64) -> Self {
        Self {
            asset_id,
            quantity,
            price,
            subtotal: price.saturating_mul(u64::from(quantity)),
        }
    }
}

/// Outcome of valuating one user's inventory.
///
/// `total` is the sum of `per_item` subtotals. Assets whose price could not
/// be resolved are listed in `failed_items` and contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuationResult {
    pub user_id: UserId,
    pub total: u64,
    /// Number of owned units fetched from the inventory.
    pub item_count: u64,
    pub per_item: Vec<ItemValuation>,
    pub failed_items: BTreeSet<AssetId>,
    pub computed_at: DateTime<Utc>,
}

impl ValuationResult {
    #[must_use]
    pub fn new(user_id: UserId, item_count: u64) -> Self {
        Self {
            user_id,
            total: 0,
            item_count,
            per_item: Vec::new(),
            failed_items: BTreeSet::new(),
            computed_at: Utc::now(),
        }
    }

    /// Add a priced asset to the result.
    pub fn push(&mut self, line: ItemValuation) {
        self.total = self.total.saturating_add(line.subtotal);
        self.per_item.push(line);
    }

    /// Record an asset whose price could not be resolved.
    pub fn record_failure(&mut self, asset_id: AssetId) {
        self.failed_items.insert(asset_id);
    }

    /// True when every distinct asset was priced.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_items.is_empty()
    }
}

/// Response body for a single valuation request.
///
/// Mirrors `{ success, userId, rap }`; the breakdown fields are only present
/// when requested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RapResponse {
    pub success: bool,
    pub user_id: UserId,
    pub rap: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemValuation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_items: Option<Vec<AssetId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_at: Option<DateTime<Utc>>,
}

impl RapResponse {
    #[must_use]
    pub fn from_result(result: &ValuationResult, breakdown: bool) -> Self {
        let failed: Vec<AssetId> = result.failed_items.iter().copied().collect();
        Self {
            success: true,
            user_id: result.user_id,
            rap: result.total,
            items: breakdown.then(|| result.per_item.clone()),
            // Failures are always reported so a partial total is never silent.
            failed_items: (breakdown || !failed.is_empty()).then_some(failed),
            computed_at: breakdown.then_some(result.computed_at),
        }
    }
}

/// Error body for a failed valuation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RapErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub kind: &'static str,
    pub error: String,
}

impl RapErrorResponse {
    #[must_use]
    pub fn new(user_id: Option<String>, error: &Error) -> Self {
        Self {
            success: false,
            user_id,
            kind: error.kind(),
            error: error.to_string(),
        }
    }
}
