//! Batch submission (intake writes with shared retry)

use crate::core::constants::DD_RETRY_BASE_DELAY_MS;
use crate::data::error::IntakeError;
use crate::data::intake::SubmissionClient;
use crate::data::types::{Batch, SubmitAck};
use crate::utils::retry::retry_with_backoff_async;

/// Submit one batch, retrying transient failures.
///
/// Failures are logged here with the metric name and cause; the caller only
/// sees whether the batch was accepted.
pub async fn submit_batch(
    batch: &Batch,
    client: &dyn SubmissionClient,
    max_attempts: u32,
) -> Option<SubmitAck> {
    let result = retry_with_backoff_async(
        max_attempts,
        DD_RETRY_BASE_DELAY_MS,
        |e: &IntakeError| e.is_transient(),
        || client.submit(batch),
    )
    .await;

    match result {
        Ok((ack, attempts)) => {
            if attempts > 1 {
                tracing::debug!(
                    metric = %batch.metric,
                    series = ack.series,
                    attempts,
                    intake = client.name(),
                    "Submitted batch after retry"
                );
            } else {
                tracing::debug!(
                    metric = %batch.metric,
                    series = ack.series,
                    intake = client.name(),
                    "Submitted batch"
                );
            }
            Some(ack)
        }
        Err((e, attempts)) => {
            tracing::warn!(
                error = %e,
                metric = %batch.metric,
                points = batch.len(),
                attempts,
                intake = client.name(),
                "Failed to submit batch"
            );
            None
        }
    }
}
