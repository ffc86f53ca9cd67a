//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!("2. Run: rapvalue config validate -c {}", path.display()));
    output::note(&format!("3. Run: rapvalue rap <USER_ID> -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(path)?;

    output::section("Effective Configuration");
    output::field(
        "Source",
        path.map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string()),
    );

    output::section("Roblox");
    output::field("Inventory", &config.roblox.inventory_url);
    output::field("Economy", &config.roblox.economy_url);
    output::field("Page size", config.roblox.page_size);
    output::field("Sort order", config.roblox.sort_order);
    output::field("Timeout", format!("{}ms", config.roblox.http.timeout_ms));
    output::field(
        "Retries",
        format!(
            "{} attempts, {}ms backoff",
            config.roblox.http.retry_max_attempts, config.roblox.http.retry_backoff_ms
        ),
    );

    output::section("Cache");
    output::field("TTL", format!("{}s", config.cache.ttl_secs));
    output::field(
        "Max entries",
        config
            .cache
            .max_entries
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
    );

    output::section("Pricing");
    let fallback: Vec<String> = config
        .pricing
        .fallback
        .fields()
        .iter()
        .map(ToString::to_string)
        .collect();
    output::field("Fallback", fallback.join(" -> "));

    output::section("Valuation");
    output::field("Max pages", config.valuation.max_pages);
    output::field(
        "Deadline",
        config
            .valuation
            .request_deadline_secs
            .map_or_else(|| "none".to_string(), |s| format!("{s}s")),
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: Option<&Path>) -> Result<()> {
    output::section("Config Validation");
    if let Some(path) = path {
        output::field("Path", path.display());
    }
    let config = Config::load_or_default(path)?;
    output::success("Config is valid");

    if config.cache.max_entries.is_none() {
        output::note("Price cache is unbounded; set cache.max_entries to cap memory");
    }
    if config.valuation.request_deadline_secs.is_none() {
        output::note(
            "No valuation deadline; set valuation.request_deadline_secs to bound requests",
        );
    }

    Ok(())
}
