//! Retry rules for judge calls and the hook contract every call reports to.
//!
//! Opening the hint stream is the only call retried by default. Submissions,
//! probes, and listings reach the caller on their first failure.
//!
//! ```rust
//! use std::time::Duration;
//! use ajudge::{JudgeError, JudgeOperation, RetryDecision, RetryPolicy};
//!
//! let policy = RetryPolicy::for_operation(JudgeOperation::OpenHintStream);
//! assert_eq!(
//!     policy.decide(1, &JudgeError::from_status(429, "busy")),
//!     RetryDecision::RetryAfter(Duration::from_millis(200))
//! );
//! assert_eq!(
//!     policy.decide(1, &JudgeError::from_status(422, "bad payload")),
//!     RetryDecision::GiveUp
//! );
//! ```

use std::future::Future;
use std::time::Duration;

use crate::{JudgeError, JudgeOperation};

const STREAM_OPEN_ATTEMPTS: u32 = 3;
const STREAM_OPEN_INITIAL_BACKOFF: Duration = Duration::from_millis(200);
const STREAM_OPEN_MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Attempt budget and backoff window. The delay doubles after every failed
/// attempt until it reaches `max_backoff`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter(Duration),
    GiveUp,
}

impl RetryPolicy {
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    pub fn stream_open() -> Self {
        Self {
            max_attempts: STREAM_OPEN_ATTEMPTS,
            initial_backoff: STREAM_OPEN_INITIAL_BACKOFF,
            max_backoff: STREAM_OPEN_MAX_BACKOFF,
        }
    }

    pub fn for_operation(operation: JudgeOperation) -> Self {
        match operation {
            JudgeOperation::OpenHintStream => Self::stream_open(),
            JudgeOperation::ListProblems
            | JudgeOperation::FetchTestCases
            | JudgeOperation::Execute
            | JudgeOperation::FindSimilar => Self::single_attempt(),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max.max(initial);
        self
    }

    /// Whether a call that just failed on `attempt` should be tried again.
    /// Only transient error kinds qualify; client errors are final.
    pub fn decide(&self, attempt: u32, error: &JudgeError) -> RetryDecision {
        if attempt >= self.max_attempts || !error.kind.is_transient() {
            return RetryDecision::GiveUp;
        }

        RetryDecision::RetryAfter(self.delay_after(attempt))
    }

    fn delay_after(&self, failed_attempt: u32) -> Duration {
        let factor = 1_u32
            .checked_shl(failed_attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

pub trait JudgeOperationHooks: Send + Sync {
    fn on_attempt_start(&self, _operation: JudgeOperation, _attempt: u32) {}

    fn on_retry_scheduled(
        &self,
        _operation: JudgeOperation,
        _attempt: u32,
        _delay: Duration,
        _error: &JudgeError,
    ) {
    }

    fn on_success(&self, _operation: JudgeOperation, _attempts: u32) {}

    fn on_failure(&self, _operation: JudgeOperation, _attempts: u32, _error: &JudgeError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl JudgeOperationHooks for NoopOperationHooks {}

/// Runs `call` under `policy`, reporting every attempt to `hooks`. `sleep`
/// is injected so tests can observe delays without waiting on them.
pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    operation: JudgeOperation,
    policy: &RetryPolicy,
    hooks: &dyn JudgeOperationHooks,
    mut call: Op,
    mut sleep: Sleep,
) -> Result<T, JudgeError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, JudgeError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;
        hooks.on_attempt_start(operation, attempt);

        let error = match call(attempt).await {
            Ok(value) => {
                hooks.on_success(operation, attempt);
                return Ok(value);
            }
            Err(error) => error,
        };

        match policy.decide(attempt, &error) {
            RetryDecision::RetryAfter(delay) => {
                hooks.on_retry_scheduled(operation, attempt, delay, &error);
                sleep(delay).await;
            }
            RetryDecision::GiveUp => {
                hooks.on_failure(operation, attempt, &error);
                return Err(error);
            }
        }
    }
}

/// Runs `call` under the default policy for `operation`.
pub async fn execute_operation<T, Op, OpFuture>(
    operation: JudgeOperation,
    hooks: &dyn JudgeOperationHooks,
    call: Op,
) -> Result<T, JudgeError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, JudgeError>>,
{
    let policy = RetryPolicy::for_operation(operation);
    execute_with_retry(operation, &policy, hooks, call, tokio::time::sleep).await
}
