//! Raw page retrieval over HTTPS

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::shared::errors::FetchError;

// Listing sites reject obvious bots; identify like a browser
const USER_AGENT: &str = "Mozilla/5.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with a bounded timeout, so one hanging listing
/// site counts as a per-target failure instead of stalling the whole run.
pub struct HttpPageFetcher {
    http_client: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}
