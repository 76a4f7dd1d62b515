use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use acommon::{ProblemId, SequenceNumber};
use ajudge::{JudgeError, JudgeOperation, JudgeOperationHooks};
use apractice::{HintPhase, PracticeError, PracticeHooks};

pub struct SafeJudgeHooks<H> {
    inner: H,
}

impl<H> SafeJudgeHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> JudgeOperationHooks for SafeJudgeHooks<H>
where
    H: JudgeOperationHooks,
{
    fn on_attempt_start(&self, operation: JudgeOperation, attempt: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(operation, attempt)
        }));
    }

    fn on_retry_scheduled(
        &self,
        operation: JudgeOperation,
        attempt: u32,
        delay: Duration,
        error: &JudgeError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_retry_scheduled(operation, attempt, delay, error)
        }));
    }

    fn on_success(&self, operation: JudgeOperation, attempts: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(operation, attempts)
        }));
    }

    fn on_failure(&self, operation: JudgeOperation, attempts: u32, error: &JudgeError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(operation, attempts, error)
        }));
    }
}

pub struct SafePracticeHooks<H> {
    inner: H,
}

impl<H> SafePracticeHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> PracticeHooks for SafePracticeHooks<H>
where
    H: PracticeHooks,
{
    fn on_catalog_refreshed(&self, problems: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_catalog_refreshed(problems)
        }));
    }

    fn on_catalog_failed(&self, error: &PracticeError) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_catalog_failed(error)));
    }

    fn on_test_cases_loaded(&self, problem_id: ProblemId, count: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_test_cases_loaded(problem_id, count)
        }));
    }

    fn on_test_cases_failed(&self, problem_id: ProblemId, error: &PracticeError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_test_cases_failed(problem_id, error)
        }));
    }

    fn on_submission_issued(&self, problem_id: ProblemId, sequence: SequenceNumber) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_submission_issued(problem_id, sequence)
        }));
    }

    fn on_submission_applied(&self, sequence: SequenceNumber, results: usize, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_submission_applied(sequence, results, elapsed)
        }));
    }

    fn on_submission_discarded(&self, sequence: SequenceNumber, latest: SequenceNumber) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_submission_discarded(sequence, latest)
        }));
    }

    fn on_submission_failed(
        &self,
        sequence: SequenceNumber,
        error: &PracticeError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_submission_failed(sequence, error, elapsed)
        }));
    }

    fn on_hint_phase(&self, generation: SequenceNumber, phase: HintPhase) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_hint_phase(generation, phase)
        }));
    }

    fn on_hint_fragment(&self, generation: SequenceNumber, bytes: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_hint_fragment(generation, bytes)
        }));
    }
}
