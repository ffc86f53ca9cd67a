//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture. The
//! valuation pipeline only ever talks to these traits; the Roblox HTTP
//! adapter implements them for production and `testkit` implements them
//! with scripted responses.
//!
//! ```text
//!                 ┌───────────────────────────┐
//!                 │        Application        │
//!                 │  fetch → group → resolve  │
//!                 └─────────────┬─────────────┘
//!                  ┌────────────┴────────────┐
//!                  ▼                         ▼
//!          ┌───────────────┐         ┌───────────────┐
//!          │InventorySource│         │  PriceSource  │
//!          └───────────────┘         └───────────────┘
//! ```

pub mod outbound;

pub use outbound::inventory::{InventoryPage, InventorySource, PageRequest, SortOrder};
pub use outbound::price::PriceSource;
