//! Unified facade over the AlgoEasy workspace crates.
//!
//! This crate is designed to be the single dependency for practice clients.
//! It re-exports the judge client, practice orchestration, and observability
//! crates and provides wiring helpers and macros for common setup.
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = algoeasy::build_workspace_from_env()?;
//! let problems = workspace.catalog().refresh().await?;
//!
//! if let Some(problem) = problems.first().cloned() {
//!     let code = problem.starter_code();
//!     workspace.open_problem(problem).await?;
//!     workspace.submit(code).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod macros;

pub mod prelude;
pub mod runtime;
pub mod transport;
pub mod util;

pub use acommon;
pub use ajudge;
pub use aobserve;
pub use apractice;

pub use acommon::{BoxFuture, ProblemId, SequenceCounter, SequenceNumber};
pub use ajudge::{
    BoxedFragmentStream, CodeRequest, ExecutionResult, HintFragmentStream, JudgeConfig,
    JudgeError, JudgeErrorKind, JudgeFuture, JudgeHttpTransport, JudgeOperation,
    JudgeOperationHooks, JudgeTransport, NoopOperationHooks, Problem, RetryDecision, RetryPolicy,
    TestCase, TestVerdict, execute_operation, execute_with_retry, starter_code_for,
};
pub use aobserve::{
    MetricsObservabilityHooks, SafeJudgeHooks, SafePracticeHooks, TracingObservabilityHooks,
};
pub use apractice::{
    CaseDetail, CatalogState, HintPhase, HintSession, HintStreamClient, LoadState,
    NOVELTY_THRESHOLD, NoopPracticeHooks, PassSummary, PracticeError, PracticeErrorKind,
    PracticeHooks, PracticeObservers, PracticeView, PracticeWorkspace, PracticeWorkspaceBuilder,
    ProblemCatalog, ResultSet, STREAM_FAILURE_NOTICE, SelectionState, SubmissionController,
    SubmissionOutcome, SubmissionSnapshot, TestCaseRepository, Tone, Verdict, case_detail,
    classify, classify_all, console_lines, summarize,
};

pub use runtime::{
    build_workspace, build_workspace_from_env, build_workspace_with, metrics_observers,
    practice_workspace, tracing_observers,
};
pub use transport::{
    build_transport_from_env, build_transport_with_client, build_transport_with_config,
};
pub use util::{hint_status_label, parse_problem_id, summary_label, tone_label, verdict_label};
