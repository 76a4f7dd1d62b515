//! Judge HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use acommon::ProblemId;

use crate::{CodeRequest, ExecutionResult, JudgeError, Problem, TestCase, TestVerdict};

#[derive(Debug, Serialize)]
pub(crate) struct ApiCodeRequest<'a> {
    pub code: &'a str,
    pub problem_id: i64,
}

impl<'a> From<&'a CodeRequest> for ApiCodeRequest<'a> {
    fn from(value: &'a CodeRequest) -> Self {
        Self {
            code: &value.code,
            problem_id: value.problem_id.get(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiProblem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub arguments: String,
}

impl From<ApiProblem> for Problem {
    fn from(value: ApiProblem) -> Self {
        Problem::new(
            ProblemId::new(value.id),
            value.title,
            value.description,
            value.arguments,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiTestCase {
    #[serde(default)]
    pub inputs: Value,
    pub expected_output: Value,
}

impl From<ApiTestCase> for TestCase {
    fn from(value: ApiTestCase) -> Self {
        TestCase::new(value_list(value.inputs), value_text(value.expected_output))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiExecuteResponse {
    pub test_cases: Vec<ApiExecutionResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiExecutionResult {
    #[serde(default)]
    pub stdout: Vec<Value>,
    #[serde(default)]
    pub stderr: Vec<Value>,
    #[serde(default)]
    pub test_result: Option<ApiTestResult>,
}

impl From<ApiExecutionResult> for ExecutionResult {
    fn from(value: ApiExecutionResult) -> Self {
        ExecutionResult {
            stdout: value.stdout.into_iter().map(console_line).collect(),
            stderr: value.stderr.into_iter().map(console_line).collect(),
            test_result: value.test_result.map(TestVerdict::from),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiTestResult {
    #[serde(default)]
    pub result: Value,
    pub passed: bool,
    #[serde(default)]
    pub inputs: Option<Value>,
    #[serde(default)]
    pub expected: Option<Value>,
}

impl From<ApiTestResult> for TestVerdict {
    fn from(value: ApiTestResult) -> Self {
        TestVerdict {
            result: value_text(value.result),
            passed: value.passed,
            inputs: value.inputs.map(value_list),
            expected: value.expected.map(value_text),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSimilarityResponse {
    pub similarity_score: f64,
}

impl ApiSimilarityResponse {
    pub(crate) fn into_score(self) -> Result<f64, JudgeError> {
        if !self.similarity_score.is_finite() {
            return Err(JudgeError::malformed_response(
                "similarity_score must be a finite number",
            ));
        }

        Ok(self.similarity_score)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Value,
}

/// Pulls the human-readable `detail` out of an error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).ok()?;
    let text = value_text(parsed.detail);
    (!text.is_empty()).then_some(text)
}

pub(crate) fn parse_json<T>(body: &[u8]) -> Result<T, JudgeError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|err| JudgeError::malformed_response(err.to_string()))
}

pub(crate) fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn value_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().map(value_text).collect(),
        Value::Null => Vec::new(),
        other => vec![value_text(other)],
    }
}

/// Console entries arrive as plain strings, `[timestamp, text]` pairs, or
/// `{timestamp, error}` records.
pub(crate) fn console_line(value: Value) -> String {
    match value {
        Value::Array(mut items) if items.len() == 2 => {
            let text = value_text(items.pop().unwrap_or(Value::Null));
            let timestamp = value_text(items.pop().unwrap_or(Value::Null));
            format!("[{timestamp}] {text}")
        }
        Value::Object(mut fields) if fields.contains_key("error") => {
            let error = value_text(fields.remove("error").unwrap_or(Value::Null));
            match fields.remove("timestamp").map(value_text) {
                Some(timestamp) => format!("[{timestamp}] {error}"),
                None => error,
            }
        }
        other => value_text(other),
    }
}
