//! Submission lifecycle: issue, execute remotely, and publish only the latest
//! issued result set.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use acommon::{ProblemId, SequenceCounter, SequenceNumber};
use ajudge::{CodeRequest, ExecutionResult, JudgeOperation, JudgeTransport, execute_operation};

use crate::{PracticeError, PracticeObservers, TestCaseRepository};

/// Results of one submission. `sequence` doubles as the version of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub sequence: SequenceNumber,
    pub problem_id: ProblemId,
    pub results: Arc<Vec<ExecutionResult>>,
}

impl ResultSet {
    pub fn as_slice(&self) -> &[ExecutionResult] {
        &self.results
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Applied(ResultSet),
    /// A later submission was issued before this one completed; its response
    /// was dropped.
    Superseded {
        sequence: SequenceNumber,
        latest: SequenceNumber,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionSnapshot {
    pub results: Option<ResultSet>,
    pub last_error: Option<PracticeError>,
    pub pending: Option<SequenceNumber>,
}

impl SubmissionSnapshot {
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Default)]
struct SubmissionSlot {
    current: Option<ResultSet>,
    last_error: Option<PracticeError>,
    pending: Option<SequenceNumber>,
}

pub struct SubmissionController {
    transport: Arc<dyn JudgeTransport>,
    repository: Arc<TestCaseRepository>,
    observers: PracticeObservers,
    sequences: SequenceCounter,
    slot: Mutex<SubmissionSlot>,
}

impl SubmissionController {
    pub fn new(transport: Arc<dyn JudgeTransport>, repository: Arc<TestCaseRepository>) -> Self {
        Self::with_observers(transport, repository, PracticeObservers::default())
    }

    pub fn with_observers(
        transport: Arc<dyn JudgeTransport>,
        repository: Arc<TestCaseRepository>,
        observers: PracticeObservers,
    ) -> Self {
        Self {
            transport,
            repository,
            observers,
            sequences: SequenceCounter::new(),
            slot: Mutex::new(SubmissionSlot::default()),
        }
    }

    /// Sends `code` for execution against the loaded test cases of
    /// `problem_id`.
    ///
    /// Exactly one execute request is made. The published result set only
    /// changes when this call is still the latest issued submission on
    /// completion and the judge returned one result per test case.
    pub async fn submit(
        &self,
        code: impl Into<String>,
        problem_id: ProblemId,
    ) -> Result<SubmissionOutcome, PracticeError> {
        let test_cases = self.repository.ready_cases(problem_id)?;
        let request = CodeRequest::new(code, problem_id);

        let sequence = {
            let mut slot = self.lock_slot()?;
            let sequence = self.sequences.issue();
            slot.pending = Some(sequence);
            sequence
        };
        self.observers
            .practice
            .on_submission_issued(problem_id, sequence);

        let started = Instant::now();
        let executed = execute_operation(
            JudgeOperation::Execute,
            self.observers.judge.as_ref(),
            |_| self.transport.execute(request.clone()),
        )
        .await
        .map_err(|err| PracticeError::submission_failed(&err))
        .and_then(|results| {
            if results.len() == test_cases.len() {
                Ok(results)
            } else {
                Err(PracticeError::malformed_response(format!(
                    "judge returned {} results for {} test cases",
                    results.len(),
                    test_cases.len()
                )))
            }
        });
        let elapsed = started.elapsed();

        let mut slot = self.lock_slot()?;
        let latest = self.sequences.latest();
        if latest != sequence {
            drop(slot);
            self.observers
                .practice
                .on_submission_discarded(sequence, latest);
            return Ok(SubmissionOutcome::Superseded { sequence, latest });
        }

        slot.pending = None;
        match executed {
            Ok(results) => {
                let result_set = ResultSet {
                    sequence,
                    problem_id,
                    results: Arc::new(results),
                };
                slot.current = Some(result_set.clone());
                slot.last_error = None;
                drop(slot);

                self.observers.practice.on_submission_applied(
                    sequence,
                    result_set.results.len(),
                    elapsed,
                );
                Ok(SubmissionOutcome::Applied(result_set))
            }
            Err(error) => {
                slot.last_error = Some(error.clone());
                drop(slot);

                self.observers
                    .practice
                    .on_submission_failed(sequence, &error, elapsed);
                Err(error)
            }
        }
    }

    pub fn snapshot(&self) -> Result<SubmissionSnapshot, PracticeError> {
        let slot = self.lock_slot()?;
        Ok(SubmissionSnapshot {
            results: slot.current.clone(),
            last_error: slot.last_error.clone(),
            pending: slot.pending,
        })
    }

    pub fn results(&self) -> Result<Option<ResultSet>, PracticeError> {
        Ok(self.lock_slot()?.current.clone())
    }

    /// Clears published state and fences off every in-flight submission.
    pub fn reset(&self) -> Result<(), PracticeError> {
        let mut slot = self.lock_slot()?;
        self.sequences.issue();
        *slot = SubmissionSlot::default();
        Ok(())
    }

    fn lock_slot(&self) -> Result<MutexGuard<'_, SubmissionSlot>, PracticeError> {
        self.slot
            .lock()
            .map_err(|_| PracticeError::state("submission slot lock poisoned"))
    }
}

impl std::fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("latest", &self.sequences.latest())
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
