//! Problem listing, ordered by id.

use std::sync::{Arc, Mutex, MutexGuard};

use acommon::{ProblemId, SequenceCounter};
use ajudge::{JudgeOperation, JudgeTransport, Problem, execute_operation};

use crate::{PracticeError, PracticeObservers};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogState {
    #[default]
    Empty,
    Loading,
    Ready(Arc<Vec<Problem>>),
    Failed(PracticeError),
}

pub struct ProblemCatalog {
    transport: Arc<dyn JudgeTransport>,
    observers: PracticeObservers,
    refreshes: SequenceCounter,
    state: Mutex<CatalogState>,
}

impl ProblemCatalog {
    pub fn new(transport: Arc<dyn JudgeTransport>) -> Self {
        Self::with_observers(transport, PracticeObservers::default())
    }

    pub fn with_observers(transport: Arc<dyn JudgeTransport>, observers: PracticeObservers) -> Self {
        Self {
            transport,
            observers,
            refreshes: SequenceCounter::new(),
            state: Mutex::new(CatalogState::Empty),
        }
    }

    pub async fn refresh(&self) -> Result<Arc<Vec<Problem>>, PracticeError> {
        let refresh = self.refreshes.issue();
        *self.lock_state()? = CatalogState::Loading;

        let fetched = execute_operation(
            JudgeOperation::ListProblems,
            self.observers.judge.as_ref(),
            |_| self.transport.list_problems(),
        )
        .await
        .map(|mut problems| {
            problems.sort_by_key(|problem| problem.id);
            Arc::new(problems)
        })
        .map_err(|err| PracticeError::catalog_load(&err));

        let mut state = self.lock_state()?;
        if !self.refreshes.is_latest(refresh) {
            return fetched;
        }

        match &fetched {
            Ok(problems) => {
                *state = CatalogState::Ready(Arc::clone(problems));
                self.observers.practice.on_catalog_refreshed(problems.len());
            }
            Err(error) => {
                *state = CatalogState::Failed(error.clone());
                self.observers.practice.on_catalog_failed(error);
            }
        }

        fetched
    }

    pub fn snapshot(&self) -> Result<CatalogState, PracticeError> {
        Ok(self.lock_state()?.clone())
    }

    pub fn problems(&self) -> Option<Arc<Vec<Problem>>> {
        match self.snapshot() {
            Ok(CatalogState::Ready(problems)) => Some(problems),
            _ => None,
        }
    }

    pub fn get(&self, id: ProblemId) -> Option<Problem> {
        self.problems()?
            .iter()
            .find(|problem| problem.id == id)
            .cloned()
    }

    /// Lowest-id problem, the default landing problem.
    pub fn first(&self) -> Option<Problem> {
        self.problems()?.first().cloned()
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, CatalogState>, PracticeError> {
        self.state
            .lock()
            .map_err(|_| PracticeError::state("problem catalog lock poisoned"))
    }
}

impl std::fmt::Debug for ProblemCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProblemCatalog")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
