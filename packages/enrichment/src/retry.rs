//! Retry-with-backoff for API calls.
//!
//! Transient failures (timeout, connection, rate limit, 5xx) are retried
//! with exponential backoff; everything else fails on the first attempt.
//! The final error carries the attempt count so downstream citations can
//! say how hard the pipeline tried.

use std::future::Future;
use std::time::Duration;

use crate::error::{EnrichError, Result};

/// Run `op` up to `max_retries` times with exponential backoff.
///
/// Attempt `n` (zero-based) that fails transiently waits
/// `base_backoff * 2^n` before the next try. The closure receives the
/// zero-based attempt number.
pub async fn with_retries<T, F, Fut>(
    max_retries: u32,
    base_backoff: Duration,
    mut op: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_retries = max_retries.max(1);

    for attempt in 0..max_retries {
        match op(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "API call succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if err.is_transient() && attempt + 1 < max_retries => {
                let delay = base_backoff * 2u32.pow(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "API call failed transiently, backing off"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                tracing::error!(
                    attempts = attempt + 1,
                    error = %err,
                    "API call failed"
                );
                // Record how many attempts were actually made.
                return Err(match err {
                    EnrichError::Api(mut api) => {
                        api.attempts = attempt + 1;
                        EnrichError::Api(api)
                    }
                    other => other,
                });
            }
        }
    }

    unreachable!("retry loop always returns")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiErrorKind};

    fn transient_err() -> EnrichError {
        ApiError::new(ApiErrorKind::ServerError, "boom").into()
    }

    #[tokio::test(start_paused = true)]
    async fn two_transient_failures_then_success() {
        let base = Duration::from_secs(1);
        let started = tokio::time::Instant::now();
        let mut calls = 0u32;

        let result = with_retries(3, base, |_attempt| {
            calls += 1;
            let outcome = if calls <= 2 {
                Err(transient_err())
            } else {
                Ok("done")
            };
            async move { outcome }
        })
        .await
        .unwrap();

        assert_eq!(result, "done");
        assert_eq!(calls, 3);
        // Backoff waits: base * 2^0 + base * 2^1 = base * 3.
        assert_eq!(started.elapsed(), base * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_report_attempt_count() {
        let mut calls = 0u32;
        let result: Result<()> = with_retries(3, Duration::from_secs(1), |_| {
            calls += 1;
            async { Err(transient_err()) }
        })
        .await;

        assert_eq!(calls, 3);
        match result {
            Err(EnrichError::Api(api)) => {
                assert_eq!(api.attempts, 3);
                assert_eq!(api.kind, ApiErrorKind::ServerError);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_transient_fails_immediately() {
        let mut calls = 0u32;
        let result: Result<()> = with_retries(3, Duration::from_secs(1), |_| {
            calls += 1;
            async { Err(ApiError::new(ApiErrorKind::Unauthorized, "bad key").into()) }
        })
        .await;

        assert_eq!(calls, 1);
        match result {
            Err(EnrichError::Api(api)) => assert_eq!(api.kind, ApiErrorKind::Unauthorized),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_on_first_attempt_makes_one_call() {
        let mut calls = 0u32;
        let result = with_retries(3, Duration::from_secs(1), |_| {
            calls += 1;
            async { Ok(42) }
        })
        .await
        .unwrap();

        assert_eq!(result, 42);
        assert_eq!(calls, 1);
    }
}
