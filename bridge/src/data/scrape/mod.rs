//! Scrape target client
//!
//! Fetches the Prometheus text exposition over HTTP and hands it to the
//! parser. One request per cycle, bounded by the configured timeout.

mod parse;

pub use parse::{ParseFailure, parse_exposition};

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use crate::core::config::ScrapeConfig;
use crate::core::constants::USER_AGENT;
use crate::data::error::ScrapeError;
use crate::data::types::MetricFamily;

/// Content types we accept, text format preferred
const ACCEPT_EXPOSITION: &str = "text/plain;version=0.0.4;q=1,*/*;q=0.1";

#[derive(Debug, Clone)]
pub struct ScrapeClient {
    client: reqwest::Client,
    url: String,
}

impl ScrapeClient {
    pub fn new(config: &ScrapeConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_EXPOSITION));
        if let Some(auth) = config.authorization() {
            let mut value = HeaderValue::from_str(&auth)
                .map_err(|e| anyhow::anyhow!("Invalid scrape bearer token: {}", e))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build scrape HTTP client: {}", e))?;

        tracing::debug!(
            url = %config.url,
            timeout_secs = config.timeout_secs,
            "Scrape client initialized"
        );
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw exposition body. Anything but HTTP 200 is a failure.
    pub async fn fetch(&self) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| ScrapeError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ScrapeError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let bytes = resp.bytes().await.map_err(|source| ScrapeError::Body {
            url: self.url.clone(),
            source,
        })?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| ScrapeError::parse(&self.url, format!("body is not UTF-8: {}", e)))
    }

    /// Fetch and parse in one step
    pub async fn scrape(&self) -> Result<Vec<MetricFamily>, ScrapeError> {
        let body = self.fetch().await?;
        tracing::trace!(url = %self.url, bytes = body.len(), "Fetched exposition");

        parse_exposition(&body).map_err(|e| ScrapeError::parse(&self.url, e.to_string()))
    }
}
