//! Handler for the `rap` command.

use futures_util::future::join_all;
use tabled::{Table, Tabled};
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RapArgs;
use crate::adapter::inbound::cli::output;
use crate::application::valuation::ValuationEngine;
use crate::domain::{RapErrorResponse, RapResponse, ValuationResult};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Price")]
    price: u64,
    #[tabled(rename = "Subtotal")]
    subtotal: u64,
}

/// Execute `rap`.
///
/// Every user is valuated concurrently against one shared price cache.
/// Returns `Ok(false)` when at least one valuation failed.
pub async fn execute(args: &RapArgs) -> Result<bool> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    config.init_logging();

    let cache = bootstrap::build_price_cache(&config);
    let engine = bootstrap::build_engine(&config, cache)?;

    let spinner = output::spinner(&format!("Valuating {} user(s)...", args.user_ids.len()));
    let outcomes = valuate_all(&engine, &args.user_ids).await;
    spinner.finish_and_clear();

    let mut all_ok = true;
    for (user_id, outcome) in args.user_ids.iter().zip(outcomes) {
        match outcome {
            Ok(result) => {
                if !result.is_complete() {
                    warn!(
                        user_id = %result.user_id,
                        failed = result.failed_items.len(),
                        "Valuation is partial"
                    );
                }
                if args.table && !output::is_json() {
                    print_table(&result);
                } else {
                    print_json(&RapResponse::from_result(&result, args.breakdown));
                }
            }
            Err(err) => {
                all_ok = false;
                print_json(&RapErrorResponse::new(Some(user_id.clone()), &err));
            }
        }
    }

    info!(cache_entries = engine.cache().len(), "Valuation run complete");
    Ok(all_ok)
}

async fn valuate_all(
    engine: &ValuationEngine,
    user_ids: &[String],
) -> Vec<std::result::Result<ValuationResult, Error>> {
    join_all(user_ids.iter().map(|id| engine.valuate(id))).await
}

fn print_json<T: serde::Serialize>(body: &T) {
    match serde_json::to_value(body) {
        Ok(value) => output::json_output(value),
        Err(err) => output::error(&format!("Failed to encode response: {err}")),
    }
}

fn print_table(result: &ValuationResult) {
    output::section(&format!("User {}", result.user_id));
    output::field("RAP", result.total);
    output::field("Items", result.item_count);

    if !result.per_item.is_empty() {
        let rows: Vec<ItemRow> = result
            .per_item
            .iter()
            .map(|line| ItemRow {
                asset: line.asset_id.to_string(),
                quantity: line.quantity,
                price: line.price,
                subtotal: line.subtotal,
            })
            .collect();
        output::block(&Table::new(rows).to_string());
    }

    for asset_id in &result.failed_items {
        output::warning(&format!("No price for asset {asset_id}"));
    }
}
