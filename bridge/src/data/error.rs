//! Error types for the scrape and intake boundaries

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain families from the scrape target. Aborts the cycle.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport failure (connect, TLS, timeout)
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Target answered with something other than 200
    #[error("Scrape target {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// Response body could not be read
    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body is not a Prometheus text exposition
    #[error("Failed to parse exposition from {url}: {message}")]
    Parse { url: String, message: String },
}

impl ScrapeError {
    pub fn parse(url: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Cycle phase the error aborted
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Request { .. } | Self::Status { .. } | Self::Body { .. } => "fetch",
            Self::Parse { .. } => "parse",
        }
    }
}

/// Failure to submit one batch. Logged per batch, never aborts the cycle.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// Transport failure (connect, TLS, timeout)
    #[error("Intake request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Intake answered with an error status or reported payload errors
    #[error("Intake rejected batch (HTTP {status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// Batch could not be encoded
    #[error("Failed to encode batch: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntakeError {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Whether resubmitting the same batch may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Rejected { status, .. } => {
                status.is_server_error()
                    || *status == StatusCode::TOO_MANY_REQUESTS
                    || *status == StatusCode::REQUEST_TIMEOUT
            }
            Self::Encode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        assert!(IntakeError::rejected(StatusCode::SERVICE_UNAVAILABLE, "").is_transient());
        assert!(IntakeError::rejected(StatusCode::TOO_MANY_REQUESTS, "").is_transient());
        assert!(IntakeError::rejected(StatusCode::REQUEST_TIMEOUT, "").is_transient());
        assert!(!IntakeError::rejected(StatusCode::FORBIDDEN, "").is_transient());
        assert!(!IntakeError::rejected(StatusCode::ACCEPTED, "bad point").is_transient());
    }

    #[test]
    fn test_scrape_error_phase() {
        let err = ScrapeError::Status {
            url: "http://broker/metrics".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.phase(), "fetch");
        assert!(err.to_string().contains("http://broker/metrics"));
        assert!(err.to_string().contains("500"));

        let err = ScrapeError::parse("http://broker/metrics", "empty");
        assert_eq!(err.phase(), "parse");
    }
}
