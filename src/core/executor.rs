use crate::models::ErrorBody;
use std::time::Duration;
use thiserror::Error;

/// Errors the resilient executor can surface to the caller.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// 401/403. Terminal on the first occurrence; the session is stale or
    /// missing and the user must re-authenticate.
    #[error("authentication failed (status {status}), please log in again")]
    Auth { status: u16 },

    /// Any other non-2xx response. Message comes from the body's `error`
    /// field when present. Retryable.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Transport-level failure (connect, DNS, timeout). Retryable.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx body that does not parse into a known shape. Terminal: the
    /// backend answered, retrying cannot fix the payload.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl ExecutorError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExecutorError::Http { .. } | ExecutorError::Network(_))
    }
}

/// How a single attempt's response should be handled.
#[derive(Debug, Clone)]
pub enum Disposition {
    /// 2xx; the body still has to be normalized and parsed.
    Success,
    /// Terminal failure, no further attempts.
    Fatal(ExecutorError),
    /// Failed, but another attempt may succeed.
    Retry(ExecutorError),
}

/// Classifies a response by status code, extracting the backend's `error`
/// field from the body when one is present.
pub fn classify_status(status: u16, body: &str) -> Disposition {
    match status {
        401 | 403 => Disposition::Fatal(ExecutorError::Auth { status }),
        s if (200..300).contains(&s) => Disposition::Success,
        s => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP error! Status: {}", s));
            Disposition::Retry(ExecutorError::Http { status: s, message })
        }
    }
}

/// Exponential backoff schedule for the analysis submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// State of one submission as it moves through the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    /// Attempt `attempt` (zero-based) is in flight.
    Attempting { attempt: u32 },
    /// The previous attempt failed; wait `delay`, then run `next_attempt`.
    Retrying { next_attempt: u32, delay: Duration },
    /// A 2xx response parsed; the driver holds the outcome.
    Succeeded,
    /// Terminal failure; the driver holds the last error.
    Failed,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    pub fn initial(&self) -> ExecutorState {
        ExecutorState::Attempting { attempt: 0 }
    }

    /// Backoff before the attempt after `attempt`: base * 2^attempt,
    /// i.e. 1s, 2s, 4s, ... with the default base.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * (1u32 << attempt.min(31))
    }

    /// Transition after a failed attempt. Non-retryable errors and an
    /// exhausted budget both end the run.
    pub fn after_failure(&self, attempt: u32, retryable: bool) -> ExecutorState {
        if !retryable {
            return ExecutorState::Failed;
        }
        let next_attempt = attempt + 1;
        if next_attempt >= self.max_attempts {
            ExecutorState::Failed
        } else {
            ExecutorState::Retrying {
                next_attempt,
                delay: self.delay_for(attempt),
            }
        }
    }
}
