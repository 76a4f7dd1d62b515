use acommon::{BoxFuture, ProblemId};

use crate::{BoxedFragmentStream, CodeRequest, ExecutionResult, JudgeError, Problem, TestCase};

pub type JudgeFuture<'a, T> = BoxFuture<'a, T>;

/// Remote judge contract consumed by the practice layer.
pub trait JudgeTransport: Send + Sync + std::fmt::Debug {
    fn list_problems<'a>(&'a self) -> JudgeFuture<'a, Result<Vec<Problem>, JudgeError>>;

    fn fetch_test_cases<'a>(
        &'a self,
        problem_id: ProblemId,
    ) -> JudgeFuture<'a, Result<Vec<TestCase>, JudgeError>>;

    fn execute<'a>(
        &'a self,
        request: CodeRequest,
    ) -> JudgeFuture<'a, Result<Vec<ExecutionResult>, JudgeError>>;

    /// Similarity of the attempt to previously seen solutions.
    fn find_similar<'a>(&'a self, request: CodeRequest) -> JudgeFuture<'a, Result<f64, JudgeError>>;

    /// Resolves once the server accepted the stream; fragments follow.
    fn open_hint_stream<'a>(
        &'a self,
        request: CodeRequest,
    ) -> JudgeFuture<'a, Result<BoxedFragmentStream<'a>, JudgeError>>;
}
