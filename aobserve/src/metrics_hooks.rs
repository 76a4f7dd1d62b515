//! Metrics-based observability hooks for judge calls and practice flows.
//!
//! ```rust
//! use aobserve::MetricsObservabilityHooks;
//! use ajudge::JudgeOperationHooks;
//!
//! fn accepts_judge_hooks(_hooks: &dyn JudgeOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_judge_hooks(&hooks);
//! ```

use std::time::Duration;

use acommon::{ProblemId, SequenceNumber};
use ajudge::{JudgeError, JudgeOperation, JudgeOperationHooks};
use apractice::{HintPhase, PracticeError, PracticeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl JudgeOperationHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, operation: JudgeOperation, _attempt: u32) {
        metrics::counter!(
            "algoeasy_judge_attempt_start_total",
            "operation" => operation.as_str()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        operation: JudgeOperation,
        _attempt: u32,
        delay: Duration,
        error: &JudgeError,
    ) {
        metrics::counter!(
            "algoeasy_judge_retry_scheduled_total",
            "operation" => operation.as_str(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "algoeasy_judge_retry_delay_seconds",
            "operation" => operation.as_str()
        )
        .record(delay.as_secs_f64());
    }

    fn on_success(&self, operation: JudgeOperation, attempts: u32) {
        metrics::counter!(
            "algoeasy_judge_success_total",
            "operation" => operation.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "algoeasy_judge_attempts_per_success",
            "operation" => operation.as_str()
        )
        .record(attempts as f64);
    }

    fn on_failure(&self, operation: JudgeOperation, attempts: u32, error: &JudgeError) {
        metrics::counter!(
            "algoeasy_judge_failure_total",
            "operation" => operation.as_str(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "algoeasy_judge_attempts_per_failure",
            "operation" => operation.as_str()
        )
        .record(attempts as f64);
    }
}

impl PracticeHooks for MetricsObservabilityHooks {
    fn on_catalog_refreshed(&self, problems: usize) {
        metrics::gauge!("algoeasy_catalog_problems").set(problems as f64);
    }

    fn on_catalog_failed(&self, error: &PracticeError) {
        metrics::counter!(
            "algoeasy_catalog_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_test_cases_loaded(&self, _problem_id: ProblemId, count: usize) {
        metrics::counter!("algoeasy_test_cases_loaded_total").increment(1);
        metrics::histogram!("algoeasy_test_cases_per_problem").record(count as f64);
    }

    fn on_test_cases_failed(&self, _problem_id: ProblemId, error: &PracticeError) {
        metrics::counter!(
            "algoeasy_test_cases_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_submission_issued(&self, _problem_id: ProblemId, _sequence: SequenceNumber) {
        metrics::counter!("algoeasy_submission_issued_total").increment(1);
    }

    fn on_submission_applied(&self, _sequence: SequenceNumber, _results: usize, elapsed: Duration) {
        metrics::counter!("algoeasy_submission_applied_total").increment(1);
        metrics::histogram!(
            "algoeasy_submission_duration_seconds",
            "status" => "applied"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_submission_discarded(&self, _sequence: SequenceNumber, _latest: SequenceNumber) {
        metrics::counter!("algoeasy_submission_discarded_total").increment(1);
    }

    fn on_submission_failed(
        &self,
        _sequence: SequenceNumber,
        error: &PracticeError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "algoeasy_submission_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "algoeasy_submission_duration_seconds",
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_hint_phase(&self, _generation: SequenceNumber, phase: HintPhase) {
        metrics::counter!("algoeasy_hint_phase_total", "phase" => format!("{:?}", phase))
            .increment(1);
    }

    fn on_hint_fragment(&self, _generation: SequenceNumber, bytes: usize) {
        metrics::counter!("algoeasy_hint_fragment_bytes_total").increment(bytes as u64);
    }
}
