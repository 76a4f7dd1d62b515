//! Common `ajudge` imports for downstream crates.

pub use crate::{
    BoxedFragmentStream, CodeRequest, ExecutionResult, HintFragmentStream, JudgeConfig,
    JudgeError, JudgeErrorKind, JudgeFuture, JudgeOperation, JudgeOperationHooks, JudgeTransport,
    NoopOperationHooks, Problem, RetryPolicy, TestCase, TestVerdict, execute_operation,
    execute_with_retry,
};
pub use acommon::{BoxFuture, ProblemId};
