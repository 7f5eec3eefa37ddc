//! Fixed-delay retry for feed connection attempts

use crate::domain::{FeedError, Result};
use crate::log_retry_attempt;
use std::future::Future;
use std::time::Duration;

/// Retry policy with a constant delay between attempts
///
/// `max_attempts` attempts produce at most `max_attempts - 1` sleeps; there is
/// no sleep after the final failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `operation` until it succeeds or the attempts are used up
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::RetriesExhausted`] carrying the last error message.
    pub async fn run<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt >= self.max_attempts => {
                    tracing::error!(
                        attempts = attempt,
                        error = %e,
                        "All attempts failed"
                    );
                    return Err(FeedError::RetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    log_retry_attempt!(attempt, self.max_attempts, self.delay.as_millis() as u64, e);
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EtlError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn refused() -> EtlError {
        FeedError::ConnectionFailed("connection refused".to_string()).into()
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_attempts_with_fixed_sleeps() {
        let policy = RetryPolicy::new(3, Duration::from_secs(5));
        let calls = AtomicUsize::new(0);
        let start = tokio::time::Instant::now();

        let result: Result<()> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(refused())
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
        match result {
            Err(EtlError::Feed(FeedError::RetriesExhausted { attempts, last_error })) => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("connection refused"));
            }
            other => panic!("Expected exhausted retries, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_first_success() {
        let policy = RetryPolicy::new(3, Duration::from_secs(5));
        let calls = AtomicUsize::new(0);
        let start = tokio::time::Instant::now();

        let value = policy
            .run(|| async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 2 {
                    Err(refused())
                } else {
                    Ok(n)
                }
            })
            .await
            .unwrap();

        assert_eq!(value, 2);
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }
}
