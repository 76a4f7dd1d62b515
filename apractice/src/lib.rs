//! Practice-session orchestration over a remote judge: test case loading,
//! ordered submissions, streamed hints, and the derived per-case views.
//!
//! ```rust
//! use apractice::{HintPhase, SelectionState};
//!
//! let mut selection = SelectionState::new();
//! assert_eq!(selection.reconcile(3), Some(0));
//! assert_eq!(selection.select(10), Some(2));
//! assert!(!HintPhase::Done.is_loading());
//! ```

mod catalog;
mod error;
mod hint;
mod hooks;
mod repository;
mod selection;
mod submission;
mod workspace;

pub mod prelude {
    pub use crate::{
        CaseDetail, CatalogState, HintPhase, HintSession, HintStreamClient, LoadState,
        NoopPracticeHooks, PassSummary, PracticeError, PracticeErrorKind, PracticeHooks,
        PracticeObservers, PracticeView, PracticeWorkspace, PracticeWorkspaceBuilder,
        ProblemCatalog, ResultSet, SelectionState, SubmissionController, SubmissionOutcome,
        SubmissionSnapshot, TestCaseRepository, Tone, Verdict,
    };
    pub use ajudge::{ExecutionResult, JudgeTransport, Problem, ProblemId, TestCase};
}

pub use catalog::{CatalogState, ProblemCatalog};
pub use error::{PracticeError, PracticeErrorKind};
pub use hint::{HintPhase, HintSession, HintStreamClient, NOVELTY_THRESHOLD, STREAM_FAILURE_NOTICE};
pub use hooks::{NoopPracticeHooks, PracticeHooks, PracticeObservers};
pub use repository::{LoadState, TestCaseRepository};
pub use selection::{
    CaseDetail, PassSummary, SelectionState, Tone, Verdict, case_detail, classify, classify_all,
    console_lines, summarize,
};
pub use submission::{ResultSet, SubmissionController, SubmissionOutcome, SubmissionSnapshot};
pub use workspace::{PracticeView, PracticeWorkspace, PracticeWorkspaceBuilder};

pub use acommon::{ProblemId, SequenceNumber};
pub use ajudge::{CodeRequest, ExecutionResult, JudgeTransport, Problem, TestCase, TestVerdict};
