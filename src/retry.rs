// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Exponential backoff for GitHub API requests.
///
/// Transient failures (rate limiting, 502s from the GraphQL endpoint) are
/// retried a bounded number of times before the last error is surfaced.
use std::{fmt::Display, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry limits with exponential backoff.
#[derive(Debug, Clone,)]
pub struct RetryPolicy
{
    /// Total number of attempts, including the first one (default: 3).
    pub max_attempts:     u32,
    /// Delay before the second attempt in milliseconds (default: 1000).
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after every failure (default: 2.0).
    pub backoff_factor:   f64,
}

impl Default for RetryPolicy
{
    fn default() -> Self
    {
        Self {
            max_attempts: 3, initial_delay_ms: 1000, backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy
{
    /// Delay preceding attempt number `attempt + 1`.
    fn delay_after(&self, attempt: u32,) -> Duration
    {
        let exponent = attempt.saturating_sub(1,) as i32;
        let millis = self.initial_delay_ms as f64 * self.backoff_factor.powi(exponent,);
        Duration::from_millis(millis as u64,)
    }
}

/// Runs `operation` until it succeeds or the policy is exhausted.
///
/// # Errors
///
/// Returns the error of the final attempt.
///
/// # Example
///
/// ```no_run
/// use contributions_markdown::{Error, RetryPolicy, retry_with_backoff};
///
/// # async fn example() -> Result<(), Error> {
/// let policy = RetryPolicy::default();
/// let value = retry_with_backoff(&policy, "fetch window", || async { Ok::<_, Error,>(42,) },)
///     .await?;
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<F, Fut, T, E,>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E,>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E,>,>,
    E: Display,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result,) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result,);
            }
            Err(error,) if attempt >= policy.max_attempts => {
                warn!("{} failed after {} attempts: {}", operation_name, attempt, error);
                return Err(error,);
            }
            Err(error,) => {
                let delay = policy.delay_after(attempt,);
                warn!(
                    "{} failed on attempt {}/{}: {}. Retrying in {}ms",
                    operation_name,
                    attempt,
                    policy.max_attempts,
                    error,
                    delay.as_millis()
                );
                sleep(delay,).await;
                attempt += 1;
            }
        }
    }
}
