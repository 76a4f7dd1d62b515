//! Client side of the remote judge: wire model, transport contract, and the
//! reqwest-backed HTTP transport with its hint event stream.
//!
//! ```rust
//! use ajudge::{CodeRequest, JudgeConfig, ProblemId};
//!
//! let config = JudgeConfig::default();
//! let request = CodeRequest::new("def solution(n):\n    pass\n", ProblemId::new(1));
//!
//! assert_eq!(config.endpoint("execute/"), "http://localhost:8000/execute/");
//! assert_eq!(request.problem_id.get(), 1);
//! ```

mod config;
mod error;
mod model;
mod resilience;
mod sse;
mod stream;
mod transport;

#[cfg(feature = "http")]
pub mod http;

pub mod prelude;

pub use acommon::{BoxFuture, ProblemId};
pub use config::{
    CONNECT_TIMEOUT_ENV, DEFAULT_BASE_URL, JUDGE_URL_ENV, JudgeConfig, REQUEST_TIMEOUT_ENV,
    STREAM_IDLE_TIMEOUT_ENV, SUBMISSION_TIMEOUT_ENV,
};
#[cfg(feature = "http")]
pub use http::JudgeHttpTransport;
pub use error::{JudgeError, JudgeErrorKind};
pub use model::{
    CodeRequest, ExecutionResult, JudgeOperation, Problem, TestCase, TestVerdict,
    starter_code_for,
};
pub use resilience::{
    JudgeOperationHooks, NoopOperationHooks, RetryDecision, RetryPolicy, execute_operation,
    execute_with_retry,
};
pub use sse::{SseDecoder, SseEvent};
pub use stream::{BoxedFragmentStream, HintFragmentStream};
pub use transport::{JudgeFuture, JudgeTransport};
