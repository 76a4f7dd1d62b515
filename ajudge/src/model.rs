//! Judge-facing domain types shared by transports and the practice layer.
//!
//! ```rust
//! use ajudge::{CodeRequest, Problem, ProblemId};
//!
//! let problem = Problem::new(ProblemId::new(1), "FizzBuzz", "Print fizz", "n: int");
//! assert_eq!(problem.starter_code(), "def solution(n: int):\n    pass\n");
//!
//! let request = CodeRequest::new("print(1)", problem.id);
//! assert_eq!(request.problem_id.get(), 1);
//! ```

use acommon::ProblemId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub description: String,
    pub parameter_signature: String,
}

impl Problem {
    pub fn new(
        id: ProblemId,
        title: impl Into<String>,
        description: impl Into<String>,
        parameter_signature: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            parameter_signature: parameter_signature.into(),
        }
    }

    /// Editor seed for a fresh attempt.
    pub fn starter_code(&self) -> String {
        starter_code_for(&self.parameter_signature)
    }
}

pub fn starter_code_for(parameter_signature: &str) -> String {
    format!("def solution({parameter_signature}):\n    pass\n")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub inputs: Vec<String>,
    pub expected_output: String,
}

impl TestCase {
    pub fn new(inputs: Vec<String>, expected_output: impl Into<String>) -> Self {
        Self {
            inputs,
            expected_output: expected_output.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVerdict {
    pub result: String,
    pub passed: bool,
    pub inputs: Option<Vec<String>>,
    pub expected: Option<String>,
}

impl TestVerdict {
    pub fn new(result: impl Into<String>, passed: bool) -> Self {
        Self {
            result: result.into(),
            passed,
            inputs: None,
            expected: None,
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<String>) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub test_result: Option<TestVerdict>,
}

impl ExecutionResult {
    pub fn with_verdict(verdict: TestVerdict) -> Self {
        Self {
            test_result: Some(verdict),
            ..Self::default()
        }
    }

    pub fn passed(result: impl Into<String>) -> Self {
        Self::with_verdict(TestVerdict::new(result, true))
    }

    pub fn failed(result: impl Into<String>) -> Self {
        Self::with_verdict(TestVerdict::new(result, false))
    }

    pub fn with_stdout(mut self, lines: Vec<String>) -> Self {
        self.stdout = lines;
        self
    }

    pub fn with_stderr(mut self, lines: Vec<String>) -> Self {
        self.stderr = lines;
        self
    }
}

/// Payload shared by the execute, similarity, and hint endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRequest {
    pub code: String,
    pub problem_id: ProblemId,
}

impl CodeRequest {
    pub fn new(code: impl Into<String>, problem_id: ProblemId) -> Self {
        Self {
            code: code.into(),
            problem_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JudgeOperation {
    ListProblems,
    FetchTestCases,
    Execute,
    FindSimilar,
    OpenHintStream,
}

impl JudgeOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListProblems => "list_problems",
            Self::FetchTestCases => "fetch_test_cases",
            Self::Execute => "execute",
            Self::FindSimilar => "find_similar",
            Self::OpenHintStream => "open_hint_stream",
        }
    }
}

impl std::fmt::Display for JudgeOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
