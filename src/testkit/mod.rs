//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`inventory`] - [`ScriptedInventory`](inventory::ScriptedInventory), a
//!   mock [`InventorySource`](crate::port::InventorySource) replaying pages.
//! - [`price`] - [`ScriptedPrices`](price::ScriptedPrices), a mock
//!   [`PriceSource`](crate::port::PriceSource) with per-asset responses.

pub mod inventory;
pub mod price;
