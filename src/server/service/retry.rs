use std::{future::Future, pin::Pin, time::Duration};

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Context for service methods providing retry logic
pub struct RetryContext<T> {
    /// Carried between attempts to skip work an earlier attempt already did
    cache: T,
    /// Max attempts before failure
    max_attempts: u32,
    /// Backoff before the first retry, doubled after every attempt
    initial_backoff: Duration,
}

impl<T> RetryContext<T>
where
    T: Clone + Default,
{
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(50);

    pub fn new() -> Self {
        Self {
            cache: T::default(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Self::DEFAULT_INITIAL_BACKOFF,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }

    /// Execute an operation with automatic retry logic.
    ///
    /// Errors classified as [`ErrorRetryStrategy::Retry`] (connection failures, Postgres
    /// serialization conflicts) are retried with exponential backoff; anything else,
    /// including admission rejections, is returned immediately.
    ///
    /// # Arguments
    /// - `description`: Description of the operation for logging (e.g., "booking for user ID 1")
    /// - `operation`: Async function performing the work, receiving the retry cache
    pub async fn execute_with_retry<R, F>(
        &mut self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: for<'a> Fn(&'a mut T) -> Pin<Box<dyn Future<Output = Result<R, Error>> + Send + 'a>>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            match operation(&mut self.cache).await {
                Ok(result) => return Ok(result),
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => return Err(e),
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff = self.initial_backoff * 2_u32.pow(attempt_count - 1);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}
