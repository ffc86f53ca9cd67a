//! Roblox API configuration.

use serde::Deserialize;

use crate::application::inventory::DEFAULT_PAGE_SIZE;
use crate::port::SortOrder;

/// Page sizes the inventory API accepts.
pub const ALLOWED_PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// Roblox HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RobloxHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts per request (1 disables retries).
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Base backoff between retries in milliseconds, multiplied by the attempt number.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_http_timeout_ms() -> u64 {
    5000
}

const fn default_http_connect_timeout_ms() -> u64 {
    2000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    concat!("rapvalue/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for RobloxHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Roblox upstream configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RobloxConfig {
    /// Inventory API base URL.
    #[serde(default = "default_inventory_url")]
    pub inventory_url: String,
    /// Economy API base URL.
    #[serde(default = "default_economy_url")]
    pub economy_url: String,
    /// Items requested per inventory page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Inventory sort order.
    #[serde(default)]
    pub sort_order: SortOrder,
    /// HTTP client settings.
    #[serde(default)]
    pub http: RobloxHttpConfig,
}

fn default_inventory_url() -> String {
    "https://inventory.roblox.com".into()
}

fn default_economy_url() -> String {
    "https://economy.roblox.com".into()
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for RobloxConfig {
    fn default() -> Self {
        Self {
            inventory_url: default_inventory_url(),
            economy_url: default_economy_url(),
            page_size: default_page_size(),
            sort_order: SortOrder::default(),
            http: RobloxHttpConfig::default(),
        }
    }
}
