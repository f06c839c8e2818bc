//! Retry policy for generation-service calls.
//!
//! Every outbound call is bounded by attempts with exponential backoff
//! rather than a hard timeout. A call that exhausts its attempts surfaces
//! the last error; callers degrade to their fallback tier.

use std::future::Future;
use std::time::Duration;

use advisor_core::{AppError, AppResult};

/// Bounded-attempt policy with doubling backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles after each failure
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(2),
        }
    }
}

/// Run `op` under the policy, returning the first success or the last error.
///
/// `what` names the call in log lines (e.g., "gemini generateContent").
pub async fn with_retries<T, F, Fut>(policy: &RetryPolicy, what: &str, mut op: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut delay = policy.initial_delay;
    let mut last_err = None;

    for attempt in 1..=policy.max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!(
                    "{} failed (attempt {}/{}): {}",
                    what,
                    attempt,
                    policy.max_attempts,
                    e
                );
                last_err = Some(e);
                if attempt < policy.max_attempts {
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    Err(last_err
        .unwrap_or_else(|| AppError::Generation(format!("{} was given zero attempts", what))))
}
