//! Metrics intake (submission side)
//!
//! The pipeline talks to the intake only through [`SubmissionClient`], one
//! call per batch.

mod datadog;
mod payload;

pub use datadog::DatadogClient;
pub use payload::{IntakeResponse, MetricPayload};

use async_trait::async_trait;

use crate::data::error::IntakeError;
use crate::data::types::{Batch, SubmitAck};

#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Submit one batch as a single request
    async fn submit(&self, batch: &Batch) -> Result<SubmitAck, IntakeError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}
