//! Outbound adapters (driven side).

pub mod roblox;
