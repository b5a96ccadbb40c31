use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::SubmissionClient;
use super::payload::{IntakeResponse, MetricPayload};
use crate::core::config::IntakeConfig;
use crate::core::constants::{DD_SERIES_PATH, USER_AGENT};
use crate::data::error::IntakeError;
use crate::data::types::{Batch, SubmitAck};

// Header names must be lowercase for static insertion
const DD_API_KEY_HEADER: &str = "dd-api-key";
const DD_APP_KEY_HEADER: &str = "dd-application-key";

/// Longest slice of an error body kept in the error message
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Datadog v2 series client
#[derive(Debug, Clone)]
pub struct DatadogClient {
    client: reqwest::Client,
    series_url: String,
}

impl DatadogClient {
    pub fn new(config: &IntakeConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut api_key = HeaderValue::from_str(config.api_key.expose())
            .map_err(|e| anyhow::anyhow!("Invalid Datadog API key: {}", e))?;
        api_key.set_sensitive(true);
        headers.insert(DD_API_KEY_HEADER, api_key);

        if let Some(ref app_key) = config.app_key {
            let mut value = HeaderValue::from_str(app_key.expose())
                .map_err(|e| anyhow::anyhow!("Invalid Datadog application key: {}", e))?;
            value.set_sensitive(true);
            headers.insert(DD_APP_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build Datadog HTTP client: {}", e))?;

        let series_url = format!("{}{}", config.endpoint, DD_SERIES_PATH);
        tracing::debug!(
            url = %series_url,
            site = %config.site,
            timeout_secs = config.timeout_secs,
            "Datadog client initialized"
        );
        Ok(Self { client, series_url })
    }
}

#[async_trait]
impl SubmissionClient for DatadogClient {
    async fn submit(&self, batch: &Batch) -> Result<SubmitAck, IntakeError> {
        let body = serde_json::to_vec(&MetricPayload::from(batch))?;
        let resp = self.client.post(&self.series_url).body(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(IntakeError::rejected(
                status,
                text.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>(),
            ));
        }

        // Some proxies answer 202 with an empty body
        let text = resp.text().await?;
        let parsed: IntakeResponse = if text.trim().is_empty() {
            IntakeResponse::default()
        } else {
            serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Unrecognized intake response body");
                IntakeResponse::default()
            })
        };

        if !parsed.errors.is_empty() {
            return Err(IntakeError::rejected(status, parsed.errors.join("; ")));
        }

        Ok(SubmitAck {
            series: batch.len(),
        })
    }

    fn name(&self) -> &'static str {
        "datadog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::secret::Secret;
    use crate::data::types::{IntakeType, Resource, SeriesPoint};
    use httpmock::prelude::*;
    use reqwest::StatusCode;
    use serde_json::json;

    fn config(endpoint: String, app_key: Option<&str>) -> IntakeConfig {
        IntakeConfig {
            site: "datadoghq.com".to_string(),
            endpoint,
            api_key: Secret::new("api-key"),
            app_key: app_key.map(Secret::new),
            timeout_secs: 5,
            retry_attempts: 1,
        }
    }

    fn backlog_batch() -> Batch {
        Batch {
            metric: "pulsar_msg_backlog".to_string(),
            points: vec![SeriesPoint {
                metric: "pulsar_msg_backlog".to_string(),
                intake_type: IntakeType::Gauge,
                value: 42.0,
                timestamp: 1_704_067_200,
                resources: vec![Resource {
                    kind: "topic".to_string(),
                    name: "t1".to_string(),
                }],
                tags: vec!["topic:t1".to_string()],
            }],
        }
    }

    #[tokio::test]
    async fn test_submit_posts_series_with_keys() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v2/series")
                    .header("dd-api-key", "api-key")
                    .header("dd-application-key", "app-key")
                    .json_body(json!({
                        "series": [{
                            "metric": "pulsar_msg_backlog",
                            "type": 3,
                            "points": [{ "timestamp": 1_704_067_200, "value": 42.0 }],
                            "resources": [{ "type": "topic", "name": "t1" }],
                            "tags": ["topic:t1"]
                        }]
                    }));
                then.status(202).json_body(json!({ "errors": [] }));
            })
            .await;

        let client = DatadogClient::new(&config(server.base_url(), Some("app-key"))).unwrap();
        let ack = client.submit(&backlog_batch()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(ack.series, 1);
    }

    #[tokio::test]
    async fn test_submit_accepts_empty_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v2/series");
                then.status(202);
            })
            .await;

        let client = DatadogClient::new(&config(server.base_url(), None)).unwrap();
        assert!(client.submit(&backlog_batch()).await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_forbidden_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v2/series");
                then.status(403).json_body(json!({ "errors": ["Forbidden"] }));
            })
            .await;

        let client = DatadogClient::new(&config(server.base_url(), None)).unwrap();
        let err = client.submit(&backlog_batch()).await.unwrap_err();

        match &err {
            IntakeError::Rejected { status, message } => {
                assert_eq!(*status, StatusCode::FORBIDDEN);
                assert!(message.contains("Forbidden"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_submit_payload_errors_are_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v2/series");
                then.status(202)
                    .json_body(json!({ "errors": ["Point timestamp is too old"] }));
            })
            .await;

        let client = DatadogClient::new(&config(server.base_url(), None)).unwrap();
        let err = client.submit(&backlog_batch()).await.unwrap_err();
        assert!(err.to_string().contains("too old"));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_submit_server_error_is_transient() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v2/series");
                then.status(503);
            })
            .await;

        let client = DatadogClient::new(&config(server.base_url(), None)).unwrap();
        let err = client.submit(&backlog_batch()).await.unwrap_err();
        assert!(err.is_transient());
    }
}
