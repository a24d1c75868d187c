//! Retry policy for JSON-RPC requests.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (0 = no retries, just try once)
    pub max_retries: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Backoff multiplier (e.g., 2.0 for exponential backoff)
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::no_retry()
    }
}

impl RetryPolicy {
    pub fn new(
        max_retries: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_retries,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
        }
    }

    /// Creates a policy with no retries (fail immediately).
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Runs `operation`, retrying while `retryable` accepts the error and attempts remain.
    ///
    /// `JsonRpcLedger` wraps every request this way, retrying only transient transport
    /// failures.
    ///
    /// ```
    /// # use std::time::Duration;
    /// # use wolf_core::LedgerError;
    /// # use wolf_fetcher_jsonrpc::RetryPolicy;
    /// # tokio_test_block_on(async {
    /// let policy = RetryPolicy::new(3, Duration::ZERO, Duration::ZERO, 2.0);
    /// let mut calls = 0;
    /// let slot = policy
    ///     .execute(
    ///         || {
    ///             calls += 1;
    ///             let result = if calls < 2 {
    ///                 Err(LedgerError::Transport("connection reset".into()))
    ///             } else {
    ///                 Ok(42u64)
    ///             };
    ///             async move { result }
    ///         },
    ///         LedgerError::is_transient,
    ///     )
    ///     .await;
    /// assert_eq!(slot, Ok(42));
    /// # });
    /// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
    /// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
    /// # }
    /// ```
    pub async fn execute<F, Fut, T, E, R>(&self, mut operation: F, retryable: R) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        R: Fn(&E) -> bool,
    {
        let mut attempts = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempts > 0 {
                        tracing::info!(
                            target: "wolf_fetcher_jsonrpc::retry",
                            "Request succeeded after {} attempt(s)",
                            attempts + 1
                        );
                    }
                    return Ok(result);
                }
                Err(err) => {
                    attempts += 1;

                    if attempts > self.max_retries || !retryable(&err) {
                        return Err(err);
                    }

                    tracing::warn!(
                        target: "wolf_fetcher_jsonrpc::retry",
                        attempt = attempts,
                        max_attempts = self.max_retries + 1,
                        error = %err,
                        ?backoff,
                        "Request failed, backing off"
                    );

                    sleep(backoff).await;

                    backoff = Duration::from_secs_f64(
                        (backoff.as_secs_f64() * self.backoff_multiplier)
                            .min(self.max_backoff.as_secs_f64()),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn always(_: &String) -> bool {
        true
    }

    #[tokio::test]
    async fn test_retry_success_after_failures() {
        let policy = RetryPolicy::new(3, Duration::from_millis(5), Duration::from_millis(20), 2.0);
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = policy
            .execute(
                || {
                    let c = counter_clone.clone();
                    async move {
                        if c.fetch_add(1, Ordering::SeqCst) < 2 {
                            return Err("simulated failure".to_string());
                        }
                        Ok(42)
                    }
                },
                always,
            )
            .await
            .unwrap();

        assert_eq!(result, 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_exhausted() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(5), 2.0);
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), String> = policy
            .execute(
                || {
                    let c = counter_clone.clone();
                    async move {
                        c.fetch_add(1, Ordering::SeqCst);
                        Err("always fails".to_string())
                    }
                },
                always,
            )
            .await;

        assert!(result.is_err());
        // Initial + 2 retries
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_default_policy_tries_once() {
        let policy = RetryPolicy::default();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), String> = policy
            .execute(
                || {
                    let c = counter_clone.clone();
                    async move {
                        c.fetch_add(1, Ordering::SeqCst);
                        Err("fails immediately".to_string())
                    }
                },
                always,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops_immediately() {
        let policy = RetryPolicy::new(5, Duration::from_millis(1), Duration::from_millis(5), 2.0);
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), String> = policy
            .execute(
                || {
                    let c = counter_clone.clone();
                    async move {
                        c.fetch_add(1, Ordering::SeqCst);
                        Err("permanent".to_string())
                    }
                },
                |err: &String| err != "permanent",
            )
            .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
