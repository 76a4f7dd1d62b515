//! Tracing-based observability hooks for judge calls and practice flows.
//!
//! ```rust
//! use aobserve::TracingObservabilityHooks;
//! use apractice::PracticeHooks;
//!
//! fn accepts_practice_hooks(_hooks: &dyn PracticeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_practice_hooks(&hooks);
//! ```

use std::time::Duration;

use acommon::{ProblemId, SequenceNumber};
use ajudge::{JudgeError, JudgeOperation, JudgeOperationHooks};
use apractice::{HintPhase, PracticeError, PracticeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl JudgeOperationHooks for TracingObservabilityHooks {
    fn on_attempt_start(&self, operation: JudgeOperation, attempt: u32) {
        tracing::info!(
            phase = "judge",
            event = "attempt_start",
            operation = %operation,
            attempt
        );
    }

    fn on_retry_scheduled(
        &self,
        operation: JudgeOperation,
        attempt: u32,
        delay: Duration,
        error: &JudgeError,
    ) {
        tracing::warn!(
            phase = "judge",
            event = "retry_scheduled",
            operation = %operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error_kind = ?error.kind,
            status = error.status,
            error = %error
        );
    }

    fn on_success(&self, operation: JudgeOperation, attempts: u32) {
        tracing::info!(
            phase = "judge",
            event = "success",
            operation = %operation,
            attempts
        );
    }

    fn on_failure(&self, operation: JudgeOperation, attempts: u32, error: &JudgeError) {
        tracing::error!(
            phase = "judge",
            event = "failure",
            operation = %operation,
            attempts,
            error_kind = ?error.kind,
            status = error.status,
            retryable = error.retryable,
            error = %error
        );
    }
}

impl PracticeHooks for TracingObservabilityHooks {
    fn on_catalog_refreshed(&self, problems: usize) {
        tracing::info!(phase = "catalog", event = "refreshed", problems);
    }

    fn on_catalog_failed(&self, error: &PracticeError) {
        tracing::error!(
            phase = "catalog",
            event = "failed",
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_test_cases_loaded(&self, problem_id: ProblemId, count: usize) {
        tracing::info!(
            phase = "test_cases",
            event = "loaded",
            problem_id = problem_id.get(),
            count
        );
    }

    fn on_test_cases_failed(&self, problem_id: ProblemId, error: &PracticeError) {
        tracing::error!(
            phase = "test_cases",
            event = "failed",
            problem_id = problem_id.get(),
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_submission_issued(&self, problem_id: ProblemId, sequence: SequenceNumber) {
        tracing::info!(
            phase = "submission",
            event = "issued",
            problem_id = problem_id.get(),
            sequence = sequence.get()
        );
    }

    fn on_submission_applied(&self, sequence: SequenceNumber, results: usize, elapsed: Duration) {
        tracing::info!(
            phase = "submission",
            event = "applied",
            sequence = sequence.get(),
            results,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_submission_discarded(&self, sequence: SequenceNumber, latest: SequenceNumber) {
        tracing::debug!(
            phase = "submission",
            event = "discarded",
            sequence = sequence.get(),
            latest = latest.get()
        );
    }

    fn on_submission_failed(
        &self,
        sequence: SequenceNumber,
        error: &PracticeError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "submission",
            event = "failed",
            sequence = sequence.get(),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            judge_error_kind = ?error.judge_kind,
            error = %error
        );
    }

    fn on_hint_phase(&self, generation: SequenceNumber, phase: HintPhase) {
        if phase == HintPhase::Errored {
            tracing::warn!(
                phase = "hint",
                event = "phase",
                generation = generation.get(),
                hint_phase = ?phase
            );
        } else {
            tracing::info!(
                phase = "hint",
                event = "phase",
                generation = generation.get(),
                hint_phase = ?phase
            );
        }
    }

    fn on_hint_fragment(&self, generation: SequenceNumber, bytes: usize) {
        tracing::trace!(
            phase = "hint",
            event = "fragment",
            generation = generation.get(),
            bytes
        );
    }
}
