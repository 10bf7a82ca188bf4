//! HTTP fetcher for downloading subscription feeds.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Maximum size per subscription payload (10 MB). Real feeds top out well
/// under 1 MB, so this provides ample margin.
pub const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Maximum total size for all downloads combined (50 MB)
const MAX_TOTAL_SIZE: usize = 50 * 1024 * 1024;

/// HTTP client for fetching subscription feeds
pub struct Fetcher {
    client: Client,
    /// Cumulative download size tracker (thread-safe for concurrent fetches)
    total_downloaded: AtomicUsize,
}

impl Fetcher {
    /// Create a new fetcher with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("subrefine/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            total_downloaded: AtomicUsize::new(0),
        })
    }

    /// Get the total bytes downloaded so far
    pub fn total_downloaded(&self) -> usize {
        self.total_downloaded.load(Ordering::Relaxed)
    }

    /// Fetch one subscription payload as raw bytes.
    ///
    /// A single attempt: any non-200 status or transport failure is an
    /// error, terminal for this source for this run. The payload is kept
    /// as bytes; feeds are not required to be valid UTF-8.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        if response.status() != StatusCode::OK {
            anyhow::bail!("HTTP {}", response.status());
        }

        // Check Content-Length header if available
        if let Some(content_length) = response.content_length() {
            if content_length as usize > MAX_PAYLOAD_SIZE {
                anyhow::bail!(
                    "Response too large: {} bytes (max: {} bytes)",
                    content_length,
                    MAX_PAYLOAD_SIZE
                );
            }
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        // Double-check actual size after download
        if body.len() > MAX_PAYLOAD_SIZE {
            anyhow::bail!(
                "Downloaded content too large: {} bytes (max: {} bytes)",
                body.len(),
                MAX_PAYLOAD_SIZE
            );
        }

        // Update cumulative download counter
        let new_total = self
            .total_downloaded
            .fetch_add(body.len(), Ordering::Relaxed)
            + body.len();
        if new_total > MAX_TOTAL_SIZE {
            anyhow::bail!(
                "Cumulative download limit exceeded: {} bytes (max: {} bytes)",
                new_total,
                MAX_TOTAL_SIZE
            );
        }

        Ok(body.to_vec())
    }
}

// Note: Default is intentionally not implemented for Fetcher
// because new() can fail and we want explicit error handling.
