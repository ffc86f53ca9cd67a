//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; every section is
//! optional and falls back to defaults that talk to the public Roblox APIs.
//! Upstream base URLs can be overridden with `RAPVALUE_INVENTORY_URL` and
//! `RAPVALUE_ECONOMY_URL`.
//!
//! # Example
//!
//! ```no_run
//! use rapvalue::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("rapvalue.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::cache::CacheConfig;
use super::logging::LoggingConfig;
use super::pricing::PricingConfig;
use super::valuation::ValuationConfig;
use crate::adapter::outbound::roblox::settings::{RobloxConfig, ALLOWED_PAGE_SIZES};
use crate::application::inventory::FetchSettings;
use crate::application::valuation::EngineSettings;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `roblox.inventory_url`.
pub const INVENTORY_URL_ENV: &str = "RAPVALUE_INVENTORY_URL";

/// Environment variable overriding `roblox.economy_url`.
pub const ECONOMY_URL_ENV: &str = "RAPVALUE_ECONOMY_URL";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Upstream API endpoints and HTTP behaviour.
    #[serde(default)]
    pub roblox: RobloxConfig,

    /// Shared price cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Price field fallback order.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Per-request pagination and deadline limits.
    #[serde(default)]
    pub valuation: ValuationConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when given, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`]; defaults are still validated so environment
    /// overrides cannot slip through unchecked.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(INVENTORY_URL_ENV) {
            self.roblox.inventory_url = url;
        }
        if let Ok(url) = std::env::var(ECONOMY_URL_ENV) {
            self.roblox.economy_url = url;
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        validate_url("inventory_url", &self.roblox.inventory_url)?;
        validate_url("economy_url", &self.roblox.economy_url)?;

        if !ALLOWED_PAGE_SIZES.contains(&self.roblox.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: format!("must be one of {ALLOWED_PAGE_SIZES:?}"),
            }
            .into());
        }
        if self.roblox.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.roblox.http.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry_max_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ttl_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cache.max_entries == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_entries",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }
        if self.pricing.fallback.is_empty() {
            return Err(ConfigError::MissingField { field: "fallback" }.into());
        }
        if self.valuation.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_pages",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.valuation.request_deadline_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "request_deadline_secs",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Settings for the valuation engine.
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            fetch: FetchSettings {
                page_size: self.roblox.page_size,
                sort_order: self.roblox.sort_order,
                max_pages: self.valuation.max_pages,
            },
            fallback: self.pricing.fallback.clone(),
            deadline: self.valuation.deadline(),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn validate_url(field: &'static str, raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }
        .into());
    }
    Ok(())
}
