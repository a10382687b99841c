//! Blog page download.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

/// Browsers get served the full article; bare clients are often blocked.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fetches blog HTML over HTTP.
pub struct BlogFetcher {
    http: reqwest::Client,
}

impl BlogFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).user_agent(USER_AGENT).build().context("Failed to create HTTP client")?;
        Ok(Self { http })
    }

    /// Download `url` and return its body as text. Non-2xx responses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching content from {}", url);

        let result = async {
            let response = self.http.get(url).send().await?.error_for_status()?;
            response.text().await
        }
        .await;

        match result {
            Ok(html) => {
                info!("Successfully fetched {} bytes from {}", html.len(), url);
                Ok(html)
            }
            Err(e) => {
                error!("Error fetching content from {}: {}", url, e);
                Err(e).with_context(|| format!("Failed to fetch {}", url))
            }
        }
    }
}
