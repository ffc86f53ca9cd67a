//! Valuation pipeline limits.

use std::time::Duration;

use serde::Deserialize;

use crate::application::inventory::DEFAULT_MAX_PAGES;

/// Bounds applied to each valuation request.
#[derive(Debug, Clone, Deserialize)]
pub struct ValuationConfig {
    /// Maximum inventory pages walked for one user.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Overall time budget for one valuation. No deadline when unset.
    #[serde(default)]
    pub request_deadline_secs: Option<u64>,
}

const fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

impl ValuationConfig {
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.request_deadline_secs.map(Duration::from_secs)
    }
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            request_deadline_secs: None,
        }
    }
}
