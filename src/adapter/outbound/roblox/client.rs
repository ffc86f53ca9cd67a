//! Roblox REST API client.
//!
//! Implements both outbound ports:
//! - [`InventorySource`] over the Inventory API collectibles endpoint
//! - [`PriceSource`] over the Economy API resale-data endpoint
//!
//! Transient failures (timeouts, connection errors, 5xx and 429 responses)
//! are retried up to the configured number of attempts. Whatever is left
//! after retrying surfaces as an [`UpstreamError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::dto::{CollectiblesResponse, ResaleDataResponse};
use super::settings::RobloxConfig;
use crate::domain::{AssetId, ResaleData};
use crate::error::{Result, UpstreamError};
use crate::port::{InventoryPage, InventorySource, PageRequest, PriceSource};

/// HTTP client for the Roblox inventory and economy APIs.
pub struct RobloxClient {
    http: HttpClient,
    inventory_url: Url,
    economy_url: Url,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl RobloxClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &RobloxConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            inventory_url: base_url(&config.inventory_url)?,
            economy_url: base_url(&config.economy_url)?,
            retry_max_attempts: config.http.retry_max_attempts,
            retry_backoff_ms: config.http.retry_backoff_ms,
        })
    }

    /// URL of one collectibles page.
    pub fn collectibles_url(&self, request: &PageRequest) -> Result<Url> {
        let mut url = self
            .inventory_url
            .join(&format!("v1/users/{}/assets/collectibles", request.user_id))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("limit", &request.limit.to_string())
                .append_pair("sortOrder", &request.sort_order.to_string());
            if let Some(cursor) = request.cursor.as_deref().filter(|c| !c.is_empty()) {
                query.append_pair("cursor", cursor);
            }
        }
        Ok(url)
    }

    /// URL of an asset's resale data.
    pub fn resale_data_url(&self, asset_id: AssetId) -> Result<Url> {
        Ok(self
            .economy_url
            .join(&format!("v1/assets/{asset_id}/resale-data"))?)
    }

    async fn get_with_retry<T>(&self, url: Url) -> std::result::Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            match self.get_once(url.clone()).await {
                Ok(parsed) => return Ok(parsed),
                Err(err) if attempt < max_attempts && err.is_transient() => {
                    self.backoff(attempt, max_attempts, &err).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once<T>(&self, url: Url) -> std::result::Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &UpstreamError) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(
                self.retry_backoff_ms.saturating_mul(u64::from(attempt)),
            ))
            .await;
        }
    }
}

/// Parse a base URL, making sure relative joins append to its path.
fn base_url(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}

fn invalid_url(err: crate::error::Error) -> UpstreamError {
    UpstreamError::Transport(err.to_string())
}

#[async_trait]
impl InventorySource for RobloxClient {
    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> std::result::Result<InventoryPage, UpstreamError> {
        let url = self.collectibles_url(request).map_err(invalid_url)?;
        debug!(url = %url, "Fetching collectibles page");
        let response: CollectiblesResponse = self.get_with_retry(url).await?;
        Ok(response.into())
    }

    fn source_name(&self) -> &'static str {
        "Roblox inventory"
    }
}

#[async_trait]
impl PriceSource for RobloxClient {
    async fn resale_data(
        &self,
        asset_id: AssetId,
    ) -> std::result::Result<ResaleData, UpstreamError> {
        let url = self.resale_data_url(asset_id).map_err(invalid_url)?;
        debug!(url = %url, "Fetching resale data");
        let response: ResaleDataResponse = self.get_with_retry(url).await?;
        Ok(response.into())
    }

    fn source_name(&self) -> &'static str {
        "Roblox economy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::port::SortOrder;

    fn client(inventory: &str, economy: &str) -> RobloxClient {
        let config = RobloxConfig {
            inventory_url: inventory.into(),
            economy_url: economy.into(),
            ..Default::default()
        };
        RobloxClient::from_config(&config).unwrap()
    }

    fn request(cursor: Option<&str>) -> PageRequest {
        PageRequest {
            user_id: UserId::new(156).unwrap(),
            limit: 100,
            sort_order: SortOrder::Asc,
            cursor: cursor.map(str::to_owned),
        }
    }

    #[test]
    fn test_first_page_url() {
        let client = client("https://inventory.roblox.com", "https://economy.roblox.com");
        let url = client.collectibles_url(&request(None)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://inventory.roblox.com/v1/users/156/assets/collectibles?limit=100&sortOrder=Asc"
        );
    }

    #[test]
    fn test_cursor_is_encoded() {
        let client = client("https://inventory.roblox.com", "https://economy.roblox.com");
        let url = client.collectibles_url(&request(Some("a b&c"))).unwrap();
        assert!(url.as_str().ends_with("&cursor=a+b%26c"), "{url}");
    }

    #[test]
    fn test_resale_url() {
        let client = client("https://inventory.roblox.com", "https://economy.roblox.com/");
        let url = client.resale_data_url(AssetId::new(1_028_606)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://economy.roblox.com/v1/assets/1028606/resale-data"
        );
    }

    #[test]
    fn test_base_path_preserved() {
        let client = client(
            "http://127.0.0.1:8080/proxy/inventory",
            "http://127.0.0.1:8080/proxy/economy",
        );
        let url = client.resale_data_url(AssetId::new(5)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/proxy/economy/v1/assets/5/resale-data"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = RobloxConfig {
            inventory_url: "not a url".into(),
            ..Default::default()
        };
        assert!(RobloxClient::from_config(&config).is_err());
    }
}
