//! Per-problem test case loading with a readiness gate.

use std::sync::{Arc, Mutex, MutexGuard};

use acommon::{ProblemId, SequenceCounter};
use ajudge::{JudgeOperation, JudgeTransport, TestCase, execute_operation};

use crate::{PracticeError, PracticeObservers};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Empty,
    Loading {
        problem_id: ProblemId,
    },
    Ready {
        problem_id: ProblemId,
        test_cases: Arc<Vec<TestCase>>,
    },
    Failed {
        problem_id: ProblemId,
        error: PracticeError,
    },
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn test_cases(&self) -> Option<&Arc<Vec<TestCase>>> {
        match self {
            Self::Ready { test_cases, .. } => Some(test_cases),
            _ => None,
        }
    }
}

pub struct TestCaseRepository {
    transport: Arc<dyn JudgeTransport>,
    observers: PracticeObservers,
    loads: SequenceCounter,
    state: Mutex<LoadState>,
}

impl TestCaseRepository {
    pub fn new(transport: Arc<dyn JudgeTransport>) -> Self {
        Self::with_observers(transport, PracticeObservers::default())
    }

    pub fn with_observers(transport: Arc<dyn JudgeTransport>, observers: PracticeObservers) -> Self {
        Self {
            transport,
            observers,
            loads: SequenceCounter::new(),
            state: Mutex::new(LoadState::Empty),
        }
    }

    /// Fetches the ordered test cases for `problem_id` and installs them.
    ///
    /// The repository is not ready until the fetch settles. Results of a load
    /// overtaken by a later `load` or `clear` are returned to the caller but
    /// never installed. Failures are not retried.
    pub async fn load(&self, problem_id: ProblemId) -> Result<Arc<Vec<TestCase>>, PracticeError> {
        let load = self.loads.issue();
        *self.lock_state()? = LoadState::Loading { problem_id };

        let fetched = execute_operation(
            JudgeOperation::FetchTestCases,
            self.observers.judge.as_ref(),
            |_| self.transport.fetch_test_cases(problem_id),
        )
        .await
        .map(Arc::new)
        .map_err(|err| PracticeError::test_case_load(&err));

        let mut state = self.lock_state()?;
        if !self.loads.is_latest(load) {
            return fetched;
        }

        match &fetched {
            Ok(test_cases) => {
                *state = LoadState::Ready {
                    problem_id,
                    test_cases: Arc::clone(test_cases),
                };
                self.observers
                    .practice
                    .on_test_cases_loaded(problem_id, test_cases.len());
            }
            Err(error) => {
                *state = LoadState::Failed {
                    problem_id,
                    error: error.clone(),
                };
                self.observers.practice.on_test_cases_failed(problem_id, error);
            }
        }

        fetched
    }

    /// Test cases for `problem_id`, or `NotReady` when another problem is
    /// loaded or a load is still pending.
    pub fn ready_cases(&self, problem_id: ProblemId) -> Result<Arc<Vec<TestCase>>, PracticeError> {
        match &*self.lock_state()? {
            LoadState::Ready {
                problem_id: loaded,
                test_cases,
            } if *loaded == problem_id => Ok(Arc::clone(test_cases)),
            LoadState::Loading { .. } => Err(PracticeError::not_ready(
                "test cases are still loading",
            )),
            LoadState::Failed { error, .. } => Err(PracticeError::not_ready(format!(
                "test cases failed to load: {}",
                error.message
            ))),
            _ => Err(PracticeError::not_ready(format!(
                "no test cases loaded for problem {problem_id}"
            ))),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().map(|state| state.is_ready()).unwrap_or(false)
    }

    pub fn snapshot(&self) -> Result<LoadState, PracticeError> {
        Ok(self.lock_state()?.clone())
    }

    /// Drops loaded cases and invalidates any pending load.
    pub fn clear(&self) -> Result<(), PracticeError> {
        self.loads.issue();
        *self.lock_state()? = LoadState::Empty;
        Ok(())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, LoadState>, PracticeError> {
        self.state
            .lock()
            .map_err(|_| PracticeError::state("test case repository lock poisoned"))
    }
}

impl std::fmt::Debug for TestCaseRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCaseRepository")
            .field("transport", &self.transport)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
