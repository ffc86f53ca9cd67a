//! Cursor-driven inventory pagination.
//!
//! Walks the inventory feed page by page until the feed reports no further
//! cursor. Any failed page aborts the whole walk: an undercounted inventory
//! would silently understate the valuation, so partial results are never
//! returned. Cursors are remembered so a feed that hands back a cursor it
//! already issued is detected instead of looped on.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{OwnedItem, UserId};
use crate::error::FetchError;
use crate::port::{InventorySource, PageRequest, SortOrder};

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default ceiling on pages walked for one user.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    pub page_size: u32,
    pub sort_order: SortOrder,
    pub max_pages: u32,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort_order: SortOrder::Asc,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Pagination state.
#[derive(Debug)]
enum PageState {
    /// Next page to request, keyed by the cursor (`None` for the first page).
    Fetching(Option<String>),
    Complete,
    Failed(FetchError),
}

/// Fetches a user's complete inventory from an [`InventorySource`].
pub struct InventoryFetcher {
    source: Arc<dyn InventorySource>,
    settings: FetchSettings,
}

impl InventoryFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn InventorySource>, settings: FetchSettings) -> Self {
        Self { source, settings }
    }

    #[must_use]
    pub fn settings(&self) -> FetchSettings {
        self.settings
    }

    /// Fetch every owned item, in feed order.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if any page fails, a cursor repeats, or the
    /// page ceiling is reached.
    pub async fn fetch_all(&self, user_id: UserId) -> Result<Vec<OwnedItem>, FetchError> {
        let mut items = Vec::new();
        let mut seen_cursors: HashSet<String> = HashSet::new();
        let mut page: u32 = 0;
        let mut state = PageState::Fetching(None);

        loop {
            state = match state {
                PageState::Fetching(_) if page >= self.settings.max_pages => {
                    PageState::Failed(FetchError::PageLimit {
                        max_pages: self.settings.max_pages,
                    })
                }
                PageState::Fetching(cursor) => {
                    page += 1;
                    let request = PageRequest {
                        user_id,
                        limit: self.settings.page_size,
                        sort_order: self.settings.sort_order,
                        cursor,
                    };

                    match self.source.fetch_page(&request).await {
                        Err(source) => PageState::Failed(FetchError::Upstream { page, source }),
                        Ok(result) => {
                            let next = result.next().map(str::to_owned);
                            debug!(
                                user_id = %user_id,
                                page,
                                count = result.items.len(),
                                has_next = next.is_some(),
                                "Fetched inventory page"
                            );
                            items.extend(result.items);

                            match next {
                                None => PageState::Complete,
                                Some(cursor) if seen_cursors.contains(&cursor) => {
                                    PageState::Failed(FetchError::CursorCycle { cursor, page })
                                }
                                Some(cursor) => {
                                    seen_cursors.insert(cursor.clone());
                                    PageState::Fetching(Some(cursor))
                                }
                            }
                        }
                    }
                }
                PageState::Complete => {
                    info!(
                        user_id = %user_id,
                        source = self.source.source_name(),
                        pages = page,
                        count = items.len(),
                        "Fetched inventory"
                    );
                    return Ok(items);
                }
                PageState::Failed(err) => {
                    warn!(user_id = %user_id, page, error = %err, "Inventory fetch failed");
                    return Err(err);
                }
            };
        }
    }
}
