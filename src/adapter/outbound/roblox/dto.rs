//! Roblox REST API response bodies.

use serde::{Deserialize, Deserializer};

use crate::domain::{OwnedItem, ResaleData};
use crate::port::InventoryPage;

/// `GET /v1/users/{userId}/assets/collectibles`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectiblesResponse {
    #[serde(default)]
    pub previous_page_cursor: Option<String>,
    #[serde(default)]
    pub next_page_cursor: Option<String>,
    #[serde(default)]
    pub data: Vec<Collectible>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collectible {
    pub asset_id: u64,
    #[serde(default)]
    pub user_asset_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub serial_number: Option<u64>,
}

impl From<Collectible> for OwnedItem {
    fn from(c: Collectible) -> Self {
        Self {
            asset_id: c.asset_id.into(),
            instance_id: c.user_asset_id,
            name: c.name,
        }
    }
}

impl From<CollectiblesResponse> for InventoryPage {
    fn from(r: CollectiblesResponse) -> Self {
        Self {
            items: r.data.into_iter().map(OwnedItem::from).collect(),
            next_cursor: r.next_page_cursor,
        }
    }
}

/// `GET /v1/assets/{assetId}/resale-data`
///
/// Only the price fields are read; each may be missing or null.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResaleDataResponse {
    #[serde(default, deserialize_with = "lenient_price")]
    pub recent_average_price: Option<u64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub lowest_price: Option<u64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub average_price: Option<u64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price_in_robux: Option<u64>,
}

impl From<ResaleDataResponse> for ResaleData {
    fn from(r: ResaleDataResponse) -> Self {
        Self {
            recent_average_price: r.recent_average_price,
            lowest_price: r.lowest_price,
            average_price: r.average_price,
            price_in_robux: r.price_in_robux,
        }
    }
}

/// Accept integer or fractional prices; negative or non-finite values count as absent.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| {
        n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        })
    }))
}
