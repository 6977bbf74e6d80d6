//! HTTP fetcher for source pages.
//!
//! Thin reqwest wrapper that sends a fixed identifying User-Agent and retries
//! failed requests with the network backoff policy before giving up.

use anyhow::{Context, Result};
use reqwest::Client;

use crate::retry::{retry, RetryConfig};

/// Fetcher for raw page markup
pub struct Fetcher {
    client: Client,
    retry: RetryConfig,
}

impl Fetcher {
    /// Create a fetcher with the given identifying User-Agent
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            retry: RetryConfig::network(),
        })
    }

    /// Fetch a page, returning its raw markup.
    ///
    /// Non-success statuses count as failures and go through the retry
    /// policy; exhaustion surfaces an error carrying the URL.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        retry(&self.retry, url, || async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .with_context(|| format!("Request failed: {}", url))?;

            let response = response
                .error_for_status()
                .with_context(|| format!("Bad status fetching {}", url))?;

            response
                .text()
                .await
                .with_context(|| format!("Failed to read body: {}", url))
        })
        .await
        .with_context(|| format!("Giving up on {} after retries", url))
    }
}
