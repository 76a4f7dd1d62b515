//! Common imports for most AlgoEasy clients.

pub use crate::{ae_case, ae_cases, ae_problem};
pub use crate::{
    build_transport_from_env, build_transport_with_client, build_transport_with_config,
    build_workspace, build_workspace_from_env, build_workspace_with, hint_status_label,
    metrics_observers, parse_problem_id, practice_workspace, summary_label, tone_label,
    tracing_observers, verdict_label,
};
pub use crate::{
    CaseDetail, CodeRequest, ExecutionResult, HintPhase, HintSession, JudgeConfig, JudgeError,
    JudgeErrorKind, JudgeTransport, PassSummary, PracticeError, PracticeErrorKind,
    PracticeObservers, PracticeView, PracticeWorkspace, Problem, ProblemId, RetryPolicy,
    SubmissionOutcome, TestCase, Tone, Verdict,
};
