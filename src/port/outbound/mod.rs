//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! Both upstream feeds are read-only.

pub mod inventory;
pub mod price;
