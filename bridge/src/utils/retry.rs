//! Async retry utilities with exponential backoff

use std::time::Duration;

/// Retry an async operation with exponential backoff.
///
/// Errors for which `should_retry` returns false end the loop immediately.
/// Returns `Ok((value, attempts))` on success, or `Err((error, attempts))` on
/// failure.
pub async fn retry_with_backoff_async<F, Fut, T, E, R>(
    max_attempts: u32,
    base_delay_ms: u64,
    should_retry: R,
    mut operation: F,
) -> Result<(T, u32), (E, u32)>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => return Ok((value, attempts)),
            Err(e) => {
                if attempts >= max_attempts || !should_retry(&e) {
                    return Err((e, attempts));
                }
                let delay = Duration::from_millis(
                    base_delay_ms.saturating_mul(2_u64.saturating_pow(attempts - 1)),
                );
                tracing::warn!(
                    error = %e,
                    attempt = attempts,
                    delay_ms = delay.as_millis(),
                    "Retrying after transient error"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
