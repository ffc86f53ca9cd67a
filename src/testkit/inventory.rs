//! Mock [`InventorySource`] replaying a fixed sequence of pages.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::OwnedItem;
use crate::error::UpstreamError;
use crate::port::{InventoryPage, InventorySource, PageRequest};

/// A mock inventory feed.
///
/// Each call to `fetch_page()` pops the next scripted result. Once the script
/// is exhausted it returns the repeating page if one is set, otherwise an
/// empty final page. Every request is recorded so tests can assert on
/// cursors and parameters.
pub struct ScriptedInventory {
    pages: Mutex<VecDeque<Result<InventoryPage, UpstreamError>>>,
    requests: Mutex<Vec<PageRequest>>,
    repeating: Option<InventoryPage>,
    delay: Option<Duration>,
}

impl ScriptedInventory {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            repeating: None,
            delay: None,
        }
    }

    /// A feed that answers every request with the same single final page.
    ///
    /// Useful when several valuations share one source.
    pub fn repeating(asset_ids: &[u64]) -> Self {
        let mut source = Self::new();
        source.repeating = Some(InventoryPage {
            items: asset_ids.iter().map(|&id| OwnedItem::new(id)).collect(),
            next_cursor: None,
        });
        source
    }

    /// Append a page holding one item per asset id.
    pub fn with_page(self, asset_ids: &[u64], next_cursor: Option<&str>) -> Self {
        let items = asset_ids.iter().map(|&id| OwnedItem::new(id)).collect();
        self.with_items(items, next_cursor)
    }

    /// Append a page with explicit items.
    pub fn with_items(self, items: Vec<OwnedItem>, next_cursor: Option<&str>) -> Self {
        self.pages.lock().push_back(Ok(InventoryPage {
            items,
            next_cursor: next_cursor.map(str::to_owned),
        }));
        self
    }

    /// Append a failing page.
    pub fn with_error(self, error: UpstreamError) -> Self {
        self.pages.lock().push_back(Err(error));
        self
    }

    /// Sleep before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Default for ScriptedInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventorySource for ScriptedInventory {
    async fn fetch_page(&self, request: &PageRequest) -> Result<InventoryPage, UpstreamError> {
        self.requests.lock().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.pages
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(self.repeating.clone().unwrap_or_default()))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
