//! Command-line interface definitions.
//!
//! Defines the CLI structure for the rapvalue application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Recent-average-price valuation of Roblox limited collectibles
#[derive(Parser, Debug)]
#[command(name = "rapvalue")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the rapvalue CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the RAP of one or more users
    Rap(RapArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `rapvalue config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
///
/// Without a path the built-in defaults are used.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `rapvalue config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the configuration file.
    #[arg(default_value = "rapvalue.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `rap` subcommand.
#[derive(Parser, Debug)]
pub struct RapArgs {
    /// Roblox user ids to valuate
    #[arg(required = true, value_name = "USER_ID")]
    pub user_ids: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Include per-item lines and failed items in the output
    #[arg(long)]
    pub breakdown: bool,

    /// Print a human-readable table instead of JSON
    #[arg(long)]
    pub table: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}
