//! Source-agnostic domain types.

pub mod id;
pub mod item;
pub mod price;
pub mod valuation;

pub use id::{AssetId, UserId};
pub use item::{OwnedItem, QuantityMap};
pub use price::{PriceFallback, PriceField, ResaleData};
pub use valuation::{ItemValuation, RapErrorResponse, RapResponse, ValuationResult};
