use thiserror::Error;

use crate::domain::id::AssetId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// A user identifier that could not be accepted.
///
/// Raised before any network activity takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("user id is required")]
    Empty,

    #[error("user id '{value}' is not a number")]
    NotNumeric { value: String },

    #[error("user id must be a positive integer")]
    NotPositive,
}

/// Failure reported by an upstream feed (inventory or price source).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("request timed out")]
    Timeout,
}

impl UpstreamError {
    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status } => *status == 429 || *status >= 500,
            Self::Transport(_) | Self::Timeout => true,
            Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Inventory pagination failed. Always fatal to the valuation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("inventory page {page} failed: {source}")]
    Upstream {
        page: u32,
        #[source]
        source: UpstreamError,
    },

    #[error("inventory cursor '{cursor}' repeated on page {page}")]
    CursorCycle { cursor: String, page: u32 },

    #[error("inventory exceeded {max_pages} pages")]
    PageLimit { max_pages: u32 },

    #[error("inventory fetch exceeded the request deadline")]
    DeadlineExceeded,
}

/// Price lookup for a single asset failed.
///
/// Recovered by the valuation engine: the asset is excluded from the total
/// and listed in the result's failed items.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("price lookup for asset {asset_id} failed: {source}")]
pub struct PriceResolutionFailure {
    pub asset_id: AssetId,
    #[source]
    pub source: UpstreamError,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Short machine-readable category used in CLI error payloads.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::Fetch(_) => "fetch",
            Self::Json(_) | Self::Http(_) | Self::Url(_) => "upstream",
            Self::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
