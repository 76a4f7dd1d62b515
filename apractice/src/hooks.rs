//! Observation points for the practice flows.
//!
//! ```rust
//! use std::sync::Arc;
//! use apractice::{NoopPracticeHooks, PracticeObservers};
//!
//! let observers = PracticeObservers::shared(Arc::new(NoopPracticeHooks));
//! let _judge = Arc::clone(&observers.judge);
//! ```

use std::sync::Arc;
use std::time::Duration;

use acommon::{ProblemId, SequenceNumber};
use ajudge::{JudgeOperationHooks, NoopOperationHooks};

use crate::{HintPhase, PracticeError};

pub trait PracticeHooks: Send + Sync {
    fn on_catalog_refreshed(&self, _problems: usize) {}

    fn on_catalog_failed(&self, _error: &PracticeError) {}

    fn on_test_cases_loaded(&self, _problem_id: ProblemId, _count: usize) {}

    fn on_test_cases_failed(&self, _problem_id: ProblemId, _error: &PracticeError) {}

    fn on_submission_issued(&self, _problem_id: ProblemId, _sequence: SequenceNumber) {}

    fn on_submission_applied(&self, _sequence: SequenceNumber, _results: usize, _elapsed: Duration) {}

    fn on_submission_discarded(&self, _sequence: SequenceNumber, _latest: SequenceNumber) {}

    fn on_submission_failed(
        &self,
        _sequence: SequenceNumber,
        _error: &PracticeError,
        _elapsed: Duration,
    ) {
    }

    fn on_hint_phase(&self, _generation: SequenceNumber, _phase: HintPhase) {}

    fn on_hint_fragment(&self, _generation: SequenceNumber, _bytes: usize) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPracticeHooks;

impl PracticeHooks for NoopPracticeHooks {}

impl JudgeOperationHooks for NoopPracticeHooks {}

/// Practice and judge hooks handed to every flow.
#[derive(Clone)]
pub struct PracticeObservers {
    pub practice: Arc<dyn PracticeHooks>,
    pub judge: Arc<dyn JudgeOperationHooks>,
}

impl PracticeObservers {
    pub fn new(practice: Arc<dyn PracticeHooks>, judge: Arc<dyn JudgeOperationHooks>) -> Self {
        Self { practice, judge }
    }

    /// One value observing both layers.
    pub fn shared<H>(hooks: Arc<H>) -> Self
    where
        H: PracticeHooks + JudgeOperationHooks + 'static,
    {
        Self {
            practice: hooks.clone(),
            judge: hooks,
        }
    }
}

impl Default for PracticeObservers {
    fn default() -> Self {
        Self::new(Arc::new(NoopPracticeHooks), Arc::new(NoopOperationHooks))
    }
}

impl std::fmt::Debug for PracticeObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticeObservers").finish_non_exhaustive()
    }
}
