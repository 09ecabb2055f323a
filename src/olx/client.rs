//! Page sources: HTTP client for OLX and rendered-snapshot reader.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Default OLX site.
pub const BASE_URL: &str = "https://www.olx.in";

/// Builds the search URL for a free-text query.
pub fn search_url(base_url: &str, query: &str) -> String {
    let slug = query.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join("-");
    format!("{}/items/q-{}?isSearchCall=true", base_url, urlencoding::encode(&slug))
}

/// Something that hands back a rendered search results page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the HTML of the page at `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// OLX HTTP client with browser impersonation.
pub struct OlxClient {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
    settle_ms: u64,
}

impl OlxClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            settle_ms: config.settle_ms,
        })
    }

    /// Adds a random delay before the request.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }

    /// Waits a fixed time after loading; the page gives no readiness signal.
    async fn settle(&self) {
        if self.settle_ms == 0 {
            return;
        }

        info!("Waiting {}ms for content to load", self.settle_ms);
        tokio::time::sleep(Duration::from_millis(self.settle_ms)).await;
    }
}

#[async_trait]
impl PageSource for OlxClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.delay().await;

        info!("Loading page: {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-IN,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 403 || status == 429 {
            warn!("Blocked by OLX ({}). Consider using a proxy or increasing delay.", status);
            anyhow::bail!("Blocked by OLX ({}). Try increasing --delay or using a proxy.", status);
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        let body = response.text().await.context("Failed to read response body")?;
        self.settle().await;
        Ok(body)
    }
}

/// Reads a page that a browser already rendered and saved to disk.
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageSource for SnapshotSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("Reading rendered snapshot of {} from {}", url, self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read HTML snapshot: {}", self.path.display()))
    }
}
