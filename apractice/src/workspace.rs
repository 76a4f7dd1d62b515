//! The practice screen's state: active problem, its test cases, the latest
//! results, the focused case, and the hint session.

use std::sync::{Arc, Mutex, MutexGuard};

use ajudge::{JudgeTransport, Problem, RetryPolicy, TestCase};
use tokio::sync::watch;

use crate::{
    CaseDetail, HintSession, HintStreamClient, LoadState, PassSummary, PracticeError,
    PracticeObservers, ProblemCatalog, ResultSet, SelectionState, SubmissionController,
    SubmissionOutcome, TestCaseRepository, Verdict, case_detail, classify_all, console_lines,
    summarize,
};

pub struct PracticeWorkspaceBuilder {
    transport: Arc<dyn JudgeTransport>,
    observers: PracticeObservers,
    hint_open_retry: RetryPolicy,
}

impl PracticeWorkspaceBuilder {
    pub fn new(transport: Arc<dyn JudgeTransport>) -> Self {
        Self {
            transport,
            observers: PracticeObservers::default(),
            hint_open_retry: RetryPolicy::stream_open(),
        }
    }

    pub fn observers(mut self, observers: PracticeObservers) -> Self {
        self.observers = observers;
        self
    }

    pub fn hint_open_retry(mut self, policy: RetryPolicy) -> Self {
        self.hint_open_retry = policy;
        self
    }

    pub fn build(self) -> PracticeWorkspace {
        let Self {
            transport,
            observers,
            hint_open_retry,
        } = self;

        let repository = Arc::new(TestCaseRepository::with_observers(
            Arc::clone(&transport),
            observers.clone(),
        ));

        PracticeWorkspace {
            catalog: ProblemCatalog::with_observers(Arc::clone(&transport), observers.clone()),
            submissions: SubmissionController::with_observers(
                Arc::clone(&transport),
                Arc::clone(&repository),
                observers.clone(),
            ),
            hints: HintStreamClient::with_observers(transport, observers)
                .with_open_retry(hint_open_retry),
            repository,
            screen: Mutex::new(Screen::default()),
        }
    }
}

#[derive(Debug, Default)]
struct Screen {
    problem: Option<Problem>,
    selection: SelectionState,
}

/// Consistent read of everything the practice screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeView {
    pub problem: Option<Problem>,
    pub starter_code: String,
    pub test_cases: LoadState,
    pub results: Option<ResultSet>,
    pub submission_error: Option<PracticeError>,
    pub submitting: bool,
    pub verdicts: Vec<Verdict>,
    pub focused: Option<usize>,
    pub detail: Option<CaseDetail>,
    pub console: Vec<String>,
    pub summary: Option<PassSummary>,
    pub hint: HintSession,
}

pub struct PracticeWorkspace {
    catalog: ProblemCatalog,
    repository: Arc<TestCaseRepository>,
    submissions: SubmissionController,
    hints: HintStreamClient,
    screen: Mutex<Screen>,
}

impl PracticeWorkspace {
    pub fn builder(transport: Arc<dyn JudgeTransport>) -> PracticeWorkspaceBuilder {
        PracticeWorkspaceBuilder::new(transport)
    }

    pub fn new(transport: Arc<dyn JudgeTransport>) -> Self {
        Self::builder(transport).build()
    }

    pub fn catalog(&self) -> &ProblemCatalog {
        &self.catalog
    }

    pub fn repository(&self) -> &TestCaseRepository {
        &self.repository
    }

    pub fn submissions(&self) -> &SubmissionController {
        &self.submissions
    }

    pub fn hints(&self) -> &HintStreamClient {
        &self.hints
    }

    /// Switches to `problem`: stops any hint, drops previous results and
    /// focus, then reloads test cases.
    pub async fn open_problem(&self, problem: Problem) -> Result<Arc<Vec<TestCase>>, PracticeError> {
        let problem_id = problem.id;
        {
            let mut screen = self.lock_screen()?;
            screen.problem = Some(problem);
            screen.selection.clear();
        }
        self.hints.abort();
        self.submissions.reset()?;

        let test_cases = self.repository.load(problem_id).await?;

        let mut screen = self.lock_screen()?;
        if screen.problem.as_ref().map(|p| p.id) == Some(problem_id) {
            screen.selection.reconcile(test_cases.len());
        }
        Ok(test_cases)
    }

    pub async fn submit(&self, code: impl Into<String>) -> Result<SubmissionOutcome, PracticeError> {
        let problem_id = self.active_problem_id()?;
        let outcome = self.submissions.submit(code, problem_id).await?;

        if let SubmissionOutcome::Applied(result_set) = &outcome {
            self.lock_screen()?
                .selection
                .reconcile(result_set.results.len());
        }
        Ok(outcome)
    }

    pub async fn request_hint(&self, code: impl Into<String>) -> Result<HintSession, PracticeError> {
        let problem_id = self.active_problem_id()?;
        Ok(self.hints.request(code, problem_id).await)
    }

    pub fn abort_hint(&self) {
        self.hints.abort();
    }

    pub fn hint_updates(&self) -> watch::Receiver<HintSession> {
        self.hints.subscribe()
    }

    pub fn select(&self, index: usize) -> Result<Option<usize>, PracticeError> {
        Ok(self.lock_screen()?.selection.select(index))
    }

    pub fn view(&self) -> Result<PracticeView, PracticeError> {
        let (problem, focused) = {
            let screen = self.lock_screen()?;
            (screen.problem.clone(), screen.selection.focused())
        };
        let test_cases = self.repository.snapshot()?;
        let submission = self.submissions.snapshot()?;

        let cases = test_cases
            .test_cases()
            .map(|cases| cases.as_slice())
            .unwrap_or_default();
        let results = submission.results.as_ref().map(ResultSet::as_slice);

        Ok(PracticeView {
            starter_code: problem
                .as_ref()
                .map(Problem::starter_code)
                .unwrap_or_else(|| ajudge::starter_code_for("")),
            verdicts: classify_all(results, cases.len()),
            detail: focused.and_then(|index| case_detail(cases, results, index)),
            console: results.map(console_lines).unwrap_or_default(),
            summary: results.map(summarize),
            submitting: submission.is_submitting(),
            submission_error: submission.last_error.clone(),
            results: submission.results.clone(),
            hint: self.hints.session(),
            problem,
            focused,
            test_cases,
        })
    }

    fn active_problem_id(&self) -> Result<acommon::ProblemId, PracticeError> {
        self.lock_screen()?
            .problem
            .as_ref()
            .map(|problem| problem.id)
            .ok_or_else(|| PracticeError::not_ready("no problem is open"))
    }

    fn lock_screen(&self) -> Result<MutexGuard<'_, Screen>, PracticeError> {
        self.screen
            .lock()
            .map_err(|_| PracticeError::state("practice screen lock poisoned"))
    }
}

impl std::fmt::Debug for PracticeWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticeWorkspace")
            .field("repository", &self.repository)
            .field("submissions", &self.submissions)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}
