//! Roblox client tests against a local HTTP stub.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use rapvalue::adapter::outbound::roblox::{RobloxClient, RobloxConfig, RobloxHttpConfig};
use rapvalue::domain::{AssetId, UserId};
use rapvalue::error::UpstreamError;
use rapvalue::infrastructure::bootstrap;
use rapvalue::infrastructure::config::settings::Config;
use rapvalue::port::{InventorySource, PageRequest, PriceSource, SortOrder};

enum Reply {
    Json(u16, &'static str),
    Stall(Duration),
}

struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn hits(&self, target: &str) -> usize {
        self.requests.lock().iter().filter(|t| *t == target).count()
    }
}

/// Serve each request with `respond(target, nth_hit_of_target)`.
async fn spawn_stub<F>(respond: F) -> StubServer
where
    F: Fn(&str, usize) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let log = Arc::clone(&log);
            let respond = Arc::clone(&respond);
            tokio::spawn(async move {
                let Some(target) = read_target(&mut socket).await else {
                    return;
                };
                let hit = {
                    let mut log = log.lock();
                    log.push(target.clone());
                    log.iter().filter(|t| **t == target).count()
                };
                match respond(&target, hit) {
                    Reply::Json(status, body) => {
                        let response = format!(
                            "HTTP/1.1 {status} Stub\r\n\
                             Content-Type: application/json\r\n\
                             Content-Length: {}\r\n\
                             Connection: close\r\n\r\n{body}",
                            body.len()
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                    Reply::Stall(delay) => tokio::time::sleep(delay).await,
                }
            });
        }
    });

    StubServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}

async fn read_target(socket: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        head.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&head)
        .split_whitespace()
        .nth(1)
        .map(str::to_owned)
}

fn stub_config(base_url: &str) -> RobloxConfig {
    RobloxConfig {
        inventory_url: base_url.to_string(),
        economy_url: base_url.to_string(),
        http: RobloxHttpConfig {
            timeout_ms: 1000,
            connect_timeout_ms: 1000,
            retry_max_attempts: 3,
            retry_backoff_ms: 0,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn resale_data_retries_server_error_then_succeeds() {
    let stub = spawn_stub(|_, hit| match hit {
        1 => Reply::Json(503, r#"{"errors":[]}"#),
        _ => Reply::Json(200, r#"{"recentAveragePrice": 42, "sales": 10}"#),
    })
    .await;
    let client = RobloxClient::from_config(&stub_config(&stub.base_url)).unwrap();

    let data = client.resale_data(AssetId::new(1)).await.unwrap();

    assert_eq!(data.recent_average_price, Some(42));
    assert_eq!(stub.hits("/v1/assets/1/resale-data"), 2);
}

#[tokio::test]
async fn resale_data_not_found_is_not_retried() {
    let stub = spawn_stub(|_, _| Reply::Json(404, r#"{"errors":[]}"#)).await;
    let client = RobloxClient::from_config(&stub_config(&stub.base_url)).unwrap();

    let err = client.resale_data(AssetId::new(9)).await.unwrap_err();

    assert_eq!(err, UpstreamError::Status { status: 404 });
    assert_eq!(stub.hits("/v1/assets/9/resale-data"), 1);
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let stub = spawn_stub(|_, _| Reply::Json(200, "<html>not json</html>")).await;
    let client = RobloxClient::from_config(&stub_config(&stub.base_url)).unwrap();

    let err = client.resale_data(AssetId::new(3)).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode(_)), "got {err:?}");
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn slow_response_times_out_after_retries() {
    let stub = spawn_stub(|_, _| Reply::Stall(Duration::from_millis(500))).await;
    let mut config = stub_config(&stub.base_url);
    config.http.timeout_ms = 20;
    config.http.retry_max_attempts = 2;
    let client = RobloxClient::from_config(&config).unwrap();

    let err = client.resale_data(AssetId::new(4)).await.unwrap_err();

    assert_eq!(err, UpstreamError::Timeout);
    assert_eq!(stub.hits("/v1/assets/4/resale-data"), 2);
}

#[tokio::test]
async fn inventory_page_carries_cursor() {
    let stub = spawn_stub(|_, _| {
        Reply::Json(
            200,
            r#"{"previousPageCursor": null, "nextPageCursor": "p2",
                "data": [{"userAssetId": 11, "assetId": 1, "name": "Hat"}]}"#,
        )
    })
    .await;
    let client = RobloxClient::from_config(&stub_config(&stub.base_url)).unwrap();
    let request = PageRequest {
        user_id: UserId::new(5).unwrap(),
        limit: 25,
        sort_order: SortOrder::Desc,
        cursor: Some("p1".to_string()),
    };

    let page = client.fetch_page(&request).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.next(), Some("p2"));
    assert_eq!(
        stub.requests(),
        vec!["/v1/users/5/assets/collectibles?limit=25&sortOrder=Desc&cursor=p1"]
    );
}

#[tokio::test]
async fn valuation_follows_cursors_and_reports_failed_prices() {
    let stub = spawn_stub(|target, hit| {
        if target.starts_with("/v1/users/5/assets/collectibles") {
            if target.contains("cursor=p2") {
                Reply::Json(
                    200,
                    r#"{"nextPageCursor": null,
                        "data": [{"assetId": 1}, {"assetId": 2}]}"#,
                )
            } else {
                Reply::Json(200, r#"{"nextPageCursor": "p2", "data": [{"assetId": 1}]}"#)
            }
        } else if target == "/v1/assets/1/resale-data" && hit > 1 {
            Reply::Json(200, r#"{"recentAveragePrice": 10}"#)
        } else if target == "/v1/assets/1/resale-data" {
            Reply::Json(503, "{}")
        } else {
            Reply::Json(404, "{}")
        }
    })
    .await;
    let config = Config {
        roblox: stub_config(&stub.base_url),
        ..Default::default()
    };
    let engine = bootstrap::build_engine(&config, bootstrap::build_price_cache(&config)).unwrap();

    let result = engine.valuate("5").await.unwrap();

    assert_eq!(result.total, 20);
    assert_eq!(result.failed_items, BTreeSet::from([AssetId::new(2)]));
    assert_eq!(
        stub.requests(),
        vec![
            "/v1/users/5/assets/collectibles?limit=100&sortOrder=Asc",
            "/v1/users/5/assets/collectibles?limit=100&sortOrder=Asc&cursor=p2",
            "/v1/assets/1/resale-data",
            "/v1/assets/1/resale-data",
            "/v1/assets/2/resale-data",
        ]
    );
}
