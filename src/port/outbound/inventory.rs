//! Inventory port: one page of a user's owned collectibles.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{OwnedItem, UserId};
use crate::error::UpstreamError;

/// Sort order requested from the inventory feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "Asc"),
            Self::Desc => write!(f, "Desc"),
        }
    }
}

/// Parameters for a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub user_id: UserId,
    pub limit: u32,
    pub sort_order: SortOrder,
    /// Cursor returned by the previous page; `None` for the first page.
    pub cursor: Option<String>,
}

/// A page of owned items plus the cursor for the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryPage {
    pub items: Vec<OwnedItem>,
    /// Absent or empty when there are no more pages.
    pub next_cursor: Option<String>,
}

impl InventoryPage {
    /// The next cursor, treating an empty string as end of data.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Source of paginated inventory data.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetch one page of the user's collectibles.
    async fn fetch_page(&self, request: &PageRequest) -> Result<InventoryPage, UpstreamError>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}
