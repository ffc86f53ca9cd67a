//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate ports to
//! implement the valuation pipeline.

pub mod cache;
pub mod inventory;
pub mod resolver;
pub mod valuation;

pub use cache::PriceCache;
pub use inventory::{FetchSettings, InventoryFetcher};
pub use resolver::PriceResolver;
pub use valuation::{EngineSettings, ValuationEngine};
