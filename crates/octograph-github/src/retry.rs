//! Retry with capped exponential back-off for GitHub requests.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 5xx, 429). Terminal errors, notably
//! [`FetchError::Authentication`] and [`FetchError::SchemaValidation`], are
//! returned after the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// How many extra attempts to make and how long to wait between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_millis(30_000),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (zero-based).
    ///
    /// | Retry | Delay with the default policy |
    /// |-------|-------------------------------|
    /// | 0     | 1 000 ms                      |
    /// | 1     | 2 000 ms                      |
    /// | 2     | 4 000 ms                      |
    /// | ≥5    | 30 000 ms (cap)               |
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.min(20);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Runs `operation` with up to `policy.max_retries` additional attempts on
/// transient errors. The last error is returned once attempts run out.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut retry = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retriable() || retry >= policy.max_retries {
                    return Err(err);
                }
                let delay = policy.delay_for(retry);
                retry += 1;
                tracing::warn!(
                    attempt = retry,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient GitHub error, retrying after back-off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
