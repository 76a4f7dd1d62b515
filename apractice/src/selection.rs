//! Focused test case and the per-case views derived from a result set.
//!
//! ```rust
//! use apractice::{ExecutionResult, Tone, Verdict, classify};
//!
//! let results = vec![ExecutionResult::passed("Fizz"), ExecutionResult::failed("5")];
//! assert_eq!(classify(Some(results.as_slice()), 0), Verdict::Passed);
//! assert_eq!(classify(Some(results.as_slice()), 1).tone(), Tone::Negative);
//! assert_eq!(classify(None, 0), Verdict::Untested);
//! ```

use ajudge::{ExecutionResult, TestCase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No result set, or no result at this index.
    Untested,
    /// A result exists but carries no verdict (the run crashed before comparing).
    NoVerdict,
    Passed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

impl Verdict {
    pub fn tone(self) -> Tone {
        match self {
            Self::Untested | Self::NoVerdict => Tone::Neutral,
            Self::Passed => Tone::Positive,
            Self::Failed => Tone::Negative,
        }
    }
}

pub fn classify(results: Option<&[ExecutionResult]>, index: usize) -> Verdict {
    let Some(result) = results.and_then(|results| results.get(index)) else {
        return Verdict::Untested;
    };

    match &result.test_result {
        Some(verdict) if verdict.passed => Verdict::Passed,
        Some(_) => Verdict::Failed,
        None => Verdict::NoVerdict,
    }
}

pub fn classify_all(results: Option<&[ExecutionResult]>, len: usize) -> Vec<Verdict> {
    (0..len).map(|index| classify(results, index)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    focused: Option<usize>,
    len: usize,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Focuses `index`, clamped to the last case. No-op with no cases.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        self.focused = (self.len > 0).then(|| index.min(self.len - 1));
        self.focused
    }

    /// Re-clamps after the case list changed size. A fresh non-empty list
    /// focuses the first case.
    pub fn reconcile(&mut self, len: usize) -> Option<usize> {
        self.len = len;
        self.focused = match (self.focused, len) {
            (_, 0) => None,
            (Some(index), _) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
        self.focused
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the detail panel shows for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDetail {
    pub index: usize,
    pub inputs: Vec<String>,
    pub expected: String,
    pub actual: Option<String>,
    pub verdict: Verdict,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

pub fn case_detail(
    test_cases: &[TestCase],
    results: Option<&[ExecutionResult]>,
    index: usize,
) -> Option<CaseDetail> {
    let case = test_cases.get(index)?;
    let result = results.and_then(|results| results.get(index));
    let verdict = result.and_then(|result| result.test_result.as_ref());

    Some(CaseDetail {
        index,
        inputs: verdict
            .and_then(|verdict| verdict.inputs.clone())
            .unwrap_or_else(|| case.inputs.clone()),
        expected: verdict
            .and_then(|verdict| verdict.expected.clone())
            .unwrap_or_else(|| case.expected_output.clone()),
        actual: verdict.map(|verdict| verdict.result.clone()),
        verdict: classify(results, index),
        stdout: result.map(|result| result.stdout.clone()).unwrap_or_default(),
        stderr: result.map(|result| result.stderr.clone()).unwrap_or_default(),
    })
}

/// Console panel lines: each result's stdout, then its stderr, in case order.
pub fn console_lines(results: &[ExecutionResult]) -> Vec<String> {
    results
        .iter()
        .flat_map(|result| result.stdout.iter().chain(result.stderr.iter()))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub passed: usize,
    pub total: usize,
}

impl PassSummary {
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}

pub fn summarize(results: &[ExecutionResult]) -> PassSummary {
    PassSummary {
        passed: results
            .iter()
            .filter(|result| result.test_result.as_ref().is_some_and(|v| v.passed))
            .count(),
        total: results.len(),
    }
}

#[cfg(test)]
mod tests {
    use ajudge::TestVerdict;

    use super::*;

    #[test]
    fn absent_verdicts_are_neutral_but_distinguishable() {
        let results = vec![
            ExecutionResult::default().with_stderr(vec!["Traceback".to_string()]),
            ExecutionResult::passed("ok"),
        ];

        assert_eq!(classify(Some(results.as_slice()), 0), Verdict::NoVerdict);
        assert_eq!(classify(Some(results.as_slice()), 0).tone(), Tone::Neutral);
        assert_eq!(classify(Some(results.as_slice()), 5), Verdict::Untested);
        assert_eq!(
            classify_all(Some(results.as_slice()), 3),
            vec![Verdict::NoVerdict, Verdict::Passed, Verdict::Untested]
        );
    }

    #[test]
    fn selection_clamps_and_follows_list_changes() {
        let mut selection = SelectionState::new();
        assert_eq!(selection.select(3), None);

        assert_eq!(selection.reconcile(4), Some(0));
        assert_eq!(selection.select(9), Some(3));
        assert_eq!(selection.reconcile(2), Some(1));
        assert_eq!(selection.reconcile(0), None);
        assert!(selection.is_empty());
    }

    #[test]
    fn detail_prefers_echoed_values_and_falls_back_to_case() {
        let cases = vec![
            TestCase::new(vec!["3".to_string()], "Fizz"),
            TestCase::new(vec!["5".to_string()], "Buzz"),
        ];
        let results = vec![
            ExecutionResult::with_verdict(
                TestVerdict::new("Fizz", true)
                    .with_inputs(vec!["3".to_string()])
                    .with_expected("Fizz"),
            )
            .with_stdout(vec!["[10:00:00] hi".to_string()]),
            ExecutionResult::failed("5"),
        ];

        let first = case_detail(&cases, Some(results.as_slice()), 0).expect("detail");
        assert_eq!(first.actual.as_deref(), Some("Fizz"));
        assert_eq!(first.stdout, vec!["[10:00:00] hi".to_string()]);

        let second = case_detail(&cases, Some(results.as_slice()), 1).expect("detail");
        assert_eq!(second.expected, "Buzz");
        assert_eq!(second.verdict, Verdict::Failed);

        let untested = case_detail(&cases, None, 1).expect("detail");
        assert_eq!(untested.actual, None);
        assert_eq!(untested.verdict, Verdict::Untested);
        assert!(case_detail(&cases, None, 2).is_none());
    }

    #[test]
    fn console_and_summary_cover_every_result() {
        let results = vec![
            ExecutionResult::passed("a")
                .with_stdout(vec!["one".to_string()])
                .with_stderr(vec!["warn".to_string()]),
            ExecutionResult::failed("b").with_stdout(vec!["two".to_string()]),
        ];

        assert_eq!(console_lines(&results), vec!["one", "warn", "two"]);
        let summary = summarize(&results);
        assert_eq!(summary, PassSummary { passed: 1, total: 2 });
        assert!(!summary.all_passed());
    }
}
