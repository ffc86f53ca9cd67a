//! Roblox web API integration.
//!
//! One client serves both upstream feeds:
//! - **Inventory API** (`inventory.roblox.com`) - paginated collectibles
//! - **Economy API** (`economy.roblox.com`) - per-asset resale data

pub mod client;
pub mod dto;
pub mod settings;

pub use client::RobloxClient;
pub use settings::{RobloxConfig, RobloxHttpConfig};
