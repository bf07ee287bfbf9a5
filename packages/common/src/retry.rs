use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single failed attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryAttempt {
    /// 1-based attempt number.
    pub attempt: u32,
    /// Error message from the failed attempt.
    pub error: String,
    /// When this attempt failed.
    pub timestamp: DateTime<Utc>,
}

impl RetryAttempt {
    pub fn new(attempt: u32, error: impl Into<String>) -> Self {
        Self {
            attempt,
            error: error.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded retry policy for calls to external services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Always at least 1.
    pub max_attempts: u32,
    /// Delay before each retry.
    pub delay: Duration,
    /// Per-attempt deadline. `None` lets an attempt run as long as it likes.
    pub attempt_timeout: Option<Duration>,
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            attempt_timeout: None,
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }
}

/// All attempts failed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("gave up after {} attempts: {}", .history.len(), .last_error)]
pub struct RetryExhausted {
    pub last_error: String,
    pub history: Vec<RetryAttempt>,
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// A timed-out attempt counts as a failure.
pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut history = Vec::new();
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        let outcome = match policy.attempt_timeout {
            Some(limit) => match tokio::time::timeout(limit, op()).await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err(format!("timed out after {}ms", limit.as_millis())),
            },
            None => op().await.map_err(|e| e.to_string()),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(error) => {
                history.push(RetryAttempt::new(attempt, error.clone()));
                if attempt < max_attempts {
                    let delay = policy.delay;
                    warn!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    let last_error = history
        .last()
        .map(|a| a.error.clone())
        .unwrap_or_default();
    Err(RetryExhausted {
        last_error,
        history,
    })
}
