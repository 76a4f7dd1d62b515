//! Practice-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use ajudge::{JudgeError, JudgeErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeErrorKind {
    /// Test cases for the active problem are not loaded.
    NotReady,
    TestCaseLoad,
    CatalogLoad,
    SubmissionFailed,
    MalformedResponse,
    HintFailed,
    Judge,
    State,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeError {
    pub kind: PracticeErrorKind,
    pub message: String,
    /// Kind of the underlying judge failure, when there was one.
    pub judge_kind: Option<JudgeErrorKind>,
}

impl PracticeError {
    pub fn new(kind: PracticeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            judge_kind: None,
        }
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        Self::new(PracticeErrorKind::NotReady, message)
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(PracticeErrorKind::MalformedResponse, message)
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::new(PracticeErrorKind::State, message)
    }

    /// Wraps a judge failure under `kind`, except malformed payloads which keep
    /// their own kind wherever they surface.
    pub fn from_judge(kind: PracticeErrorKind, error: &JudgeError) -> Self {
        let kind = if error.kind == JudgeErrorKind::MalformedResponse {
            PracticeErrorKind::MalformedResponse
        } else {
            kind
        };

        Self {
            kind,
            message: error.message.clone(),
            judge_kind: Some(error.kind),
        }
    }

    pub fn test_case_load(error: &JudgeError) -> Self {
        Self::from_judge(PracticeErrorKind::TestCaseLoad, error)
    }

    pub fn catalog_load(error: &JudgeError) -> Self {
        Self::from_judge(PracticeErrorKind::CatalogLoad, error)
    }

    pub fn submission_failed(error: &JudgeError) -> Self {
        Self::from_judge(PracticeErrorKind::SubmissionFailed, error)
    }

    pub fn hint_failed(error: &JudgeError) -> Self {
        Self::from_judge(PracticeErrorKind::HintFailed, error)
    }
}

impl Display for PracticeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for PracticeError {}

impl From<JudgeError> for PracticeError {
    fn from(value: JudgeError) -> Self {
        PracticeError::from_judge(PracticeErrorKind::Judge, &value)
    }
}
