//! YouBike station feed client.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::Station;

use super::StationSource;
use super::dto::decode_stations;
use super::error::FetchError;

/// Default feed URL (Taipei City open data, YouBike 2.0).
pub const DEFAULT_FEED_URL: &str =
    "https://tcgbusfs.blob.core.windows.net/dotapp/youbike/v2/youbike_immediate.json";

/// Total attempts per fetch, including the first.
const MAX_ATTEMPTS: u32 = 2;

/// Fixed pause between the failed first attempt and the retry.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Something that can GET a URL and hand back the body.
///
/// The feed client only needs this much of HTTP, which keeps the retry and
/// decoding logic testable without a network.
pub trait Transport {
    fn get_text(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Feed URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Delay before the single retry
    pub retry_delay: Duration,
}

impl FeedConfig {
    /// Create a config pointing at the given feed URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the delay before retrying (tests use zero).
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("youbike-widget/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Client for the station feed.
///
/// Every call is a fresh round trip; nothing is cached here. A failed
/// attempt (network or decode) is retried exactly once after a fixed delay.
#[derive(Debug, Clone)]
pub struct FeedClient<T = HttpTransport> {
    transport: T,
    url: String,
    retry_delay: Duration,
}

impl FeedClient<HttpTransport> {
    /// Create a client that talks HTTP.
    pub fn new(config: FeedConfig) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(config.timeout_secs)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> FeedClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: T, config: FeedConfig) -> Self {
        Self {
            transport,
            url: config.url,
            retry_delay: config.retry_delay,
        }
    }

    /// The feed URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the full station list.
    ///
    /// Returns the error from the last attempt once retries are exhausted.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, FetchError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once().await {
                Ok(stations) => {
                    debug!(attempt, count = stations.len(), "fetched station feed");
                    return Ok(stations);
                }
                Err(e) if attempt < MAX_ATTEMPTS => {
                    warn!(attempt, error = %e, "station feed fetch failed, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self) -> Result<Vec<Station>, FetchError> {
        let body = self.transport.get_text(&self.url).await?;
        decode_stations(&body)
    }
}

impl<T: Transport + Sync> StationSource for FeedClient<T> {
    async fn fetch_stations(&self) -> Result<Vec<Station>, FetchError> {
        FeedClient::fetch_stations(self).await
    }
}
