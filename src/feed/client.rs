use anyhow::{Context, Result};
use reqwest::{header, Client};
use std::time::{Duration, Instant};
use tracing::debug;

use super::error::FeedError;
use super::types::RawScoreRecord;

/// Install the ring crypto provider for rustls (required for rustls 0.23+).
/// Safe to call more than once.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// HTTP client for the competition results feed.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct FeedClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl FeedClient {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET the feed and parse it into typed records.
    ///
    /// The whole batch is rejected if any record is missing a required field.
    pub async fn fetch_records(&self) -> Result<Vec<RawScoreRecord>, FeedError> {
        let start = Instant::now();
        debug!(url = %self.url, "fetching results feed");

        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(FeedError::from_status(status, &body));
        }

        let records = parse_records(&body)?;
        debug!(
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "results feed parsed"
        );
        Ok(records)
    }

    fn classify(&self, err: reqwest::Error) -> FeedError {
        if err.is_timeout() {
            FeedError::Timeout(self.timeout)
        } else {
            FeedError::Network(err)
        }
    }
}

/// Create a feed client for the given URL with a per-request timeout
pub fn create_client(url: &str, timeout: Duration) -> Result<FeedClient> {
    install_crypto_provider();

    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("topout/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    Ok(FeedClient {
        client,
        url: url.to_string(),
        timeout,
    })
}

/// Parse a feed body (a JSON array of score records)
pub fn parse_records(body: &str) -> Result<Vec<RawScoreRecord>, FeedError> {
    Ok(serde_json::from_str(body)?)
}
