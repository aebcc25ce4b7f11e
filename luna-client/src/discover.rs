//! Local device discovery.
//!
//! A luna device answers `GET /api/ping` with `{"device": "luna", ...}`.
//! Discovery probes a list of candidate base URLs (by default the common
//! local ports) and returns the first that identifies itself as a luna
//! device. Unreachable ports and non-luna answers are skipped silently.

use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Ports probed by [`find_device`], in order.
pub const DEFAULT_PROBE_PORTS: &[u16] = &[3000, 8080, 8000, 3001];

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct PingResponse {
    #[serde(default)]
    device: Option<String>,
}

/// Probe the default localhost ports for a luna device.
///
/// Returns the base URL of the first responding device, if any.
pub async fn find_device(client: &reqwest::Client) -> Option<Url> {
    let candidates = DEFAULT_PROBE_PORTS
        .iter()
        .filter_map(|port| Url::parse(&format!("http://localhost:{port}")).ok());
    probe_base_urls(client, candidates).await
}

/// Probe the given base URLs for a luna device, in order.
pub async fn probe_base_urls(
    client: &reqwest::Client,
    base_urls: impl IntoIterator<Item = Url>,
) -> Option<Url> {
    for base_url in base_urls {
        if ping_device(client, &base_url).await {
            tracing::debug!(%base_url, "found luna device");
            return Some(base_url);
        }
    }
    None
}

async fn ping_device(client: &reqwest::Client, base_url: &Url) -> bool {
    let url = format!("{}/api/ping", base_url.as_str().trim_end_matches('/'));
    let response = match client.get(&url).timeout(PROBE_TIMEOUT).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            tracing::debug!(%url, status = %response.status(), "probe rejected");
            return false;
        }
        Err(error) => {
            tracing::debug!(%url, %error, "probe unreachable");
            return false;
        }
    };

    match response.json::<PingResponse>().await {
        Ok(ping) => ping.device.as_deref() == Some("luna"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn ping_server(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_finds_luna_device() {
        let server = ping_server(serde_json::json!({"device": "luna"})).await;
        let client = reqwest::Client::new();
        let base_url = Url::parse(&server.uri()).unwrap();

        let found = probe_base_urls(&client, vec![base_url.clone()]).await;
        assert_eq!(found, Some(base_url));
    }

    #[tokio::test]
    async fn test_rejects_other_device() {
        let server = ping_server(serde_json::json!({"device": "toaster"})).await;
        let client = reqwest::Client::new();
        let base_url = Url::parse(&server.uri()).unwrap();

        assert_eq!(probe_base_urls(&client, vec![base_url]).await, None);
    }

    #[tokio::test]
    async fn test_skips_unreachable_then_finds() {
        let server = ping_server(serde_json::json!({"device": "luna"})).await;
        let client = reqwest::Client::new();
        let dead = Url::parse("http://localhost:1").unwrap();
        let live = Url::parse(&server.uri()).unwrap();

        let found = probe_base_urls(&client, vec![dead, live.clone()]).await;
        assert_eq!(found, Some(live));
    }

    #[tokio::test]
    async fn test_non_success_status_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = reqwest::Client::new();
        let base_url = Url::parse(&server.uri()).unwrap();

        assert_eq!(probe_base_urls(&client, vec![base_url]).await, None);
    }
}
