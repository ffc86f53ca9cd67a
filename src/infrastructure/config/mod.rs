//! Infrastructure configuration modules.

pub mod cache;
pub mod logging;
pub mod pricing;
pub mod settings;
pub mod valuation;
