//! rapvalue - Recent-average-price valuation of Roblox limited collectibles.
//!
//! Given a user id, the crate walks the user's paginated collectibles
//! inventory, groups owned units by asset, resolves one price per distinct
//! asset through a shared TTL cache, and sums `price × quantity` into the
//! user's RAP.
//!
//! # Architecture
//!
//! - **`domain`** - Identifiers, owned items, resale data and valuation results
//! - **`port`** - Outbound traits for inventory pages and resale data
//! - **`application`** - Inventory fetcher, price cache, price resolver and
//!   the valuation engine that drives them
//! - **`adapter`** - Roblox REST client (outbound) and the CLI (inbound)
//! - **`infrastructure`** - Configuration, logging and runtime wiring
//!
//! # Features
//!
//! - `testkit` - Scripted inventory and price sources for tests
//!
//! # Example
//!
//! ```no_run
//! use rapvalue::infrastructure::bootstrap;
//! use rapvalue::infrastructure::config::settings::Config;
//!
//! # async fn run() -> rapvalue::error::Result<()> {
//! let config = Config::load_or_default(None)?;
//! let cache = bootstrap::build_price_cache(&config);
//! let engine = bootstrap::build_engine(&config, cache)?;
//! let result = engine.valuate("156").await?;
//! println!("{}", result.total);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
