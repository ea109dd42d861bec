//! Retry with exponential backoff for transient provider errors.
//!
//! Transport failures and 429 responses are retried; parse errors and other
//! non-2xx statuses are propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ProviderError;

/// Returns `true` if `err` is a transient condition worth retrying.
fn is_retriable(err: &ProviderError) -> bool {
    matches!(
        err,
        ProviderError::RateLimited { .. } | ProviderError::Http(_)
    )
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// Sleeps `backoff_base_secs * 2^attempt` seconds between attempts, up to
/// `max_retries` additional attempts after the first. Non-retriable errors
/// are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        // Exponential backoff: base * 2^attempt seconds, capped to avoid
        // shift overflow on extreme configs.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient provider error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
