use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ajudge::{
    BoxedFragmentStream, CodeRequest, ExecutionResult, JudgeError, JudgeErrorKind, JudgeFuture,
    JudgeOperation, JudgeOperationHooks, JudgeTransport, Problem, ProblemId, TestCase,
};
use apractice::{
    CatalogState, HintPhase, PracticeError, PracticeErrorKind, PracticeHooks, PracticeObservers,
    PracticeWorkspace, STREAM_FAILURE_NOTICE, SequenceNumber, SubmissionOutcome, Tone, Verdict,
};
use futures_util::{StreamExt, stream};
use tokio::sync::oneshot;

type ExecuteReply = Result<Vec<ExecutionResult>, JudgeError>;

#[derive(Debug, Default)]
struct FakeJudge {
    problems: Vec<Problem>,
    test_cases: HashMap<i64, Vec<TestCase>>,
    executions: Mutex<VecDeque<ExecuteReply>>,
    gated: Mutex<HashMap<String, oneshot::Receiver<ExecuteReply>>>,
    similarity: Mutex<VecDeque<Result<f64, JudgeError>>>,
    hint_streams: Mutex<VecDeque<Vec<Result<String, JudgeError>>>>,
    stall_hint_streams: bool,
    requests: Mutex<Vec<(JudgeOperation, Option<CodeRequest>)>>,
}

impl FakeJudge {
    fn with_problem(mut self, problem: Problem, cases: Vec<TestCase>) -> Self {
        self.test_cases.insert(problem.id.get(), cases);
        self.problems.push(problem);
        self
    }

    fn reply(self, reply: ExecuteReply) -> Self {
        self.executions.lock().expect("executions lock").push_back(reply);
        self
    }

    fn hint(self, score: Result<f64, JudgeError>, items: Vec<Result<String, JudgeError>>) -> Self {
        self.similarity.lock().expect("similarity lock").push_back(score);
        self.hint_streams.lock().expect("streams lock").push_back(items);
        self
    }

    /// Hint streams stay open after their scripted fragments.
    fn stalled_hints(mut self) -> Self {
        self.stall_hint_streams = true;
        self
    }

    fn gate(&self, code: &str) -> oneshot::Sender<ExecuteReply> {
        let (tx, rx) = oneshot::channel();
        self.gated
            .lock()
            .expect("gated lock")
            .insert(code.to_string(), rx);
        tx
    }

    fn record(&self, operation: JudgeOperation, request: Option<CodeRequest>) {
        self.requests
            .lock()
            .expect("requests lock")
            .push((operation, request));
    }

    fn count(&self, operation: JudgeOperation) -> usize {
        self.requests
            .lock()
            .expect("requests lock")
            .iter()
            .filter(|(op, _)| *op == operation)
            .count()
    }
}

impl JudgeTransport for FakeJudge {
    fn list_problems<'a>(&'a self) -> JudgeFuture<'a, Result<Vec<Problem>, JudgeError>> {
        Box::pin(async move {
            self.record(JudgeOperation::ListProblems, None);
            Ok(self.problems.clone())
        })
    }

    fn fetch_test_cases<'a>(
        &'a self,
        problem_id: ProblemId,
    ) -> JudgeFuture<'a, Result<Vec<TestCase>, JudgeError>> {
        Box::pin(async move {
            self.record(JudgeOperation::FetchTestCases, None);
            self.test_cases
                .get(&problem_id.get())
                .cloned()
                .ok_or_else(|| JudgeError::from_status(404, "No test cases found for this problem"))
        })
    }

    fn execute<'a>(
        &'a self,
        request: CodeRequest,
    ) -> JudgeFuture<'a, Result<Vec<ExecutionResult>, JudgeError>> {
        Box::pin(async move {
            self.record(JudgeOperation::Execute, Some(request.clone()));
            let gate = self.gated.lock().expect("gated lock").remove(&request.code);
            match gate {
                Some(gate) => gate.await.expect("gate sender kept"),
                None => self
                    .executions
                    .lock()
                    .expect("executions lock")
                    .pop_front()
                    .expect("scripted execution"),
            }
        })
    }

    fn find_similar<'a>(&'a self, request: CodeRequest) -> JudgeFuture<'a, Result<f64, JudgeError>> {
        Box::pin(async move {
            self.record(JudgeOperation::FindSimilar, Some(request));
            self.similarity
                .lock()
                .expect("similarity lock")
                .pop_front()
                .expect("scripted similarity")
        })
    }

    fn open_hint_stream<'a>(
        &'a self,
        request: CodeRequest,
    ) -> JudgeFuture<'a, Result<BoxedFragmentStream<'a>, JudgeError>> {
        Box::pin(async move {
            self.record(JudgeOperation::OpenHintStream, Some(request));
            let items = self
                .hint_streams
                .lock()
                .expect("streams lock")
                .pop_front()
                .expect("scripted stream");
            if self.stall_hint_streams {
                Ok(Box::pin(stream::iter(items).chain(stream::pending()))
                    as BoxedFragmentStream<'a>)
            } else {
                Ok(Box::pin(stream::iter(items)) as BoxedFragmentStream<'a>)
            }
        })
    }
}

#[derive(Debug, Default)]
struct RecordingHooks {
    events: Mutex<Vec<String>>,
}

impl RecordingHooks {
    fn push(&self, event: String) {
        self.events.lock().expect("events lock").push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().expect("events lock").clone()
    }
}

impl PracticeHooks for RecordingHooks {
    fn on_submission_issued(&self, _problem_id: ProblemId, sequence: SequenceNumber) {
        self.push(format!("issued:{sequence}"));
    }

    fn on_submission_applied(&self, sequence: SequenceNumber, _results: usize, _elapsed: Duration) {
        self.push(format!("applied:{sequence}"));
    }

    fn on_submission_discarded(&self, sequence: SequenceNumber, _latest: SequenceNumber) {
        self.push(format!("discarded:{sequence}"));
    }

    fn on_submission_failed(
        &self,
        sequence: SequenceNumber,
        _error: &PracticeError,
        _elapsed: Duration,
    ) {
        self.push(format!("failed:{sequence}"));
    }

    fn on_hint_phase(&self, _generation: SequenceNumber, phase: HintPhase) {
        self.push(format!("hint:{phase:?}"));
    }
}

impl JudgeOperationHooks for RecordingHooks {
    fn on_failure(&self, operation: JudgeOperation, _attempts: u32, error: &JudgeError) {
        self.push(format!("judge_failure:{operation}:{:?}", error.kind));
    }
}

fn fizzbuzz() -> Problem {
    Problem::new(ProblemId::new(1), "FizzBuzz", "Print fizz or buzz", "n: int")
}

fn two_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(vec!["3".to_string()], "Fizz"),
        TestCase::new(vec!["5".to_string()], "Buzz"),
    ]
}

fn workspace(judge: Arc<FakeJudge>) -> (PracticeWorkspace, Arc<RecordingHooks>) {
    let hooks = Arc::new(RecordingHooks::default());
    let workspace = PracticeWorkspace::builder(judge)
        .observers(PracticeObservers::shared(Arc::clone(&hooks)))
        .build();
    (workspace, hooks)
}

#[tokio::test]
async fn passed_and_failed_cases_are_classified_by_index() {
    let judge = Arc::new(
        FakeJudge::default()
            .with_problem(fizzbuzz(), two_cases())
            .reply(Ok(vec![
                ExecutionResult::passed("Fizz").with_stdout(vec!["[12:00:00] checking 3".to_string()]),
                ExecutionResult::failed("5"),
            ])),
    );
    let (workspace, _) = workspace(judge);

    workspace.open_problem(fizzbuzz()).await.expect("open");
    let outcome = workspace
        .submit("def solution(n: int):\n    return 'Fizz'\n")
        .await
        .expect("submit");
    assert!(matches!(outcome, SubmissionOutcome::Applied(_)));

    let view = workspace.view().expect("view");
    assert_eq!(view.verdicts, vec![Verdict::Passed, Verdict::Failed]);
    assert_eq!(view.verdicts[0].tone(), Tone::Positive);
    assert_eq!(view.verdicts[1].tone(), Tone::Negative);
    assert_eq!(view.console, vec!["[12:00:00] checking 3".to_string()]);
    assert_eq!(view.summary.map(|s| (s.passed, s.total)), Some((1, 2)));
    assert_eq!(view.focused, Some(0));

    assert_eq!(workspace.select(7).expect("select"), Some(1));
    let detail = workspace.view().expect("view").detail.expect("detail");
    assert_eq!(detail.expected, "Buzz");
    assert_eq!(detail.actual.as_deref(), Some("5"));
}

#[tokio::test]
async fn novel_attempt_streams_full_hint() {
    let judge = Arc::new(
        FakeJudge::default()
            .with_problem(fizzbuzz(), two_cases())
            .hint(
                Ok(0.05),
                vec![
                    Ok("Try ".to_string()),
                    Ok("sorting ".to_string()),
                    Ok("first.".to_string()),
                ],
            ),
    );
    let (workspace, hooks) = workspace(Arc::clone(&judge));
    workspace.open_problem(fizzbuzz()).await.expect("open");

    let session = workspace.request_hint("code").await.expect("hint");

    assert!(session.was_novel_attempt);
    assert_eq!(session.text, "Try sorting first.");
    assert_eq!(session.phase, HintPhase::Done);
    assert_eq!(workspace.view().expect("view").hint, session);
    assert_eq!(judge.count(JudgeOperation::FindSimilar), 1);
    assert_eq!(judge.count(JudgeOperation::OpenHintStream), 1);

    let phases = hooks
        .events()
        .into_iter()
        .filter(|event| event.starts_with("hint:"))
        .collect::<Vec<_>>();
    assert_eq!(phases, vec!["hint:Probing", "hint:Streaming", "hint:Done"]);
}

#[tokio::test]
async fn rejected_submission_keeps_previous_results_and_fails_once() {
    let judge = Arc::new(
        FakeJudge::default()
            .with_problem(fizzbuzz(), two_cases())
            .reply(Ok(vec![
                ExecutionResult::passed("Fizz"),
                ExecutionResult::passed("Buzz"),
            ]))
            .reply(Err(JudgeError::from_status(422, "invalid code payload"))),
    );
    let (workspace, hooks) = workspace(judge);
    workspace.open_problem(fizzbuzz()).await.expect("open");

    workspace.submit("v1").await.expect("first submit");
    let before = workspace.view().expect("view").results;

    let error = workspace.submit("v2").await.expect_err("rejected");
    assert_eq!(error.kind, PracticeErrorKind::SubmissionFailed);
    assert_eq!(error.judge_kind, Some(JudgeErrorKind::ClientStatus));

    let view = workspace.view().expect("view");
    assert_eq!(view.results, before);
    assert_eq!(view.verdicts, vec![Verdict::Passed, Verdict::Passed]);
    assert_eq!(view.submission_error, Some(error));

    let failures = hooks
        .events()
        .into_iter()
        .filter(|event| event.starts_with("failed:"))
        .collect::<Vec<_>>();
    assert_eq!(failures.len(), 1);
    assert!(
        hooks
            .events()
            .contains(&"judge_failure:execute:ClientStatus".to_string())
    );
}

#[tokio::test]
async fn dropped_hint_stream_keeps_fragment_and_appends_notice() {
    let judge = Arc::new(
        FakeJudge::default()
            .with_problem(fizzbuzz(), two_cases())
            .hint(
                Ok(0.4),
                vec![
                    Ok("Try ".to_string()),
                    Err(JudgeError::transport("connection reset by peer")),
                ],
            ),
    );
    let (workspace, _) = workspace(judge);
    workspace.open_problem(fizzbuzz()).await.expect("open");

    let session = workspace.request_hint("code").await.expect("hint");

    assert_eq!(session.phase, HintPhase::Errored);
    assert_eq!(session.text, format!("Try \n\n{STREAM_FAILURE_NOTICE}"));
    assert!(!session.was_novel_attempt);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn latest_issued_submission_wins_regardless_of_arrival_order() {
    let judge = Arc::new(FakeJudge::default().with_problem(fizzbuzz(), two_cases()));
    let first = judge.gate("v1");
    let second = judge.gate("v2");
    let third = judge.gate("v3");
    let (workspace, _) = workspace(Arc::clone(&judge));
    workspace.open_problem(fizzbuzz()).await.expect("open");

    let labelled = |label: &str| -> ExecuteReply {
        Ok(vec![
            ExecutionResult::passed(label),
            ExecutionResult::failed(label),
        ])
    };

    let (a, b, c, _) = tokio::join!(
        workspace.submit("v1"),
        workspace.submit("v2"),
        workspace.submit("v3"),
        async {
            third.send(labelled("v3")).expect("send v3");
            tokio::task::yield_now().await;
            first.send(labelled("v1")).expect("send v1");
            tokio::task::yield_now().await;
            second.send(labelled("v2")).expect("send v2");
        }
    );

    let outcomes = [a.expect("v1"), b.expect("v2"), c.expect("v3")];
    let applied = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            SubmissionOutcome::Applied(set) => Some(set.clone()),
            SubmissionOutcome::Superseded { .. } => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(applied.len(), 1);

    let highest = outcomes
        .iter()
        .map(|outcome| match outcome {
            SubmissionOutcome::Applied(set) => set.sequence,
            SubmissionOutcome::Superseded { sequence, .. } => *sequence,
        })
        .max()
        .expect("three outcomes");
    assert_eq!(applied[0].sequence, highest);

    let view = workspace.view().expect("view");
    assert_eq!(view.results, Some(applied[0].clone()));
    assert!(!view.submitting);
    assert_eq!(judge.count(JudgeOperation::Execute), 3);
}

#[tokio::test]
async fn switching_problem_discards_in_flight_submission() {
    let judge = Arc::new(
        FakeJudge::default()
            .with_problem(fizzbuzz(), two_cases())
            .with_problem(
                Problem::new(ProblemId::new(2), "Sum", "Add two numbers", "a, b"),
                vec![TestCase::new(vec!["1".to_string(), "2".to_string()], "3")],
            ),
    );
    let gate = judge.gate("slow");
    let (workspace, _) = workspace(Arc::clone(&judge));
    workspace.open_problem(fizzbuzz()).await.expect("open");

    let (outcome, _) = tokio::join!(workspace.submit("slow"), async {
        let sum = workspace.catalog().refresh().await.expect("catalog");
        workspace
            .open_problem(sum[1].clone())
            .await
            .expect("open second");
        gate.send(Ok(vec![
            ExecutionResult::passed("x"),
            ExecutionResult::passed("y"),
        ]))
        .expect("send");
    });

    assert!(matches!(
        outcome.expect("submit"),
        SubmissionOutcome::Superseded { .. }
    ));
    let view = workspace.view().expect("view");
    assert_eq!(view.problem.map(|p| p.id), Some(ProblemId::new(2)));
    assert_eq!(view.starter_code, "def solution(a, b):\n    pass\n");
    assert_eq!(view.results, None);
    assert_eq!(view.verdicts, vec![Verdict::Untested]);
    assert_eq!(view.focused, Some(0));
}

#[tokio::test]
async fn catalog_is_sorted_and_missing_cases_block_submission() {
    let judge = Arc::new(
        FakeJudge::default()
            .with_problem(
                Problem::new(ProblemId::new(3), "Three", "", ""),
                vec![TestCase::new(Vec::new(), "3")],
            )
            .with_problem(fizzbuzz(), two_cases()),
    );
    let (workspace, _) = workspace(Arc::clone(&judge));

    let problems = workspace.catalog().refresh().await.expect("catalog");
    let ids = problems.iter().map(|p| p.id.get()).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(
        workspace.catalog().first().map(|p| p.title),
        Some("FizzBuzz".to_string())
    );
    assert!(matches!(
        workspace.catalog().snapshot().expect("snapshot"),
        CatalogState::Ready(_)
    ));

    let error = workspace.submit("code").await.expect_err("no problem");
    assert_eq!(error.kind, PracticeErrorKind::NotReady);

    let unknown = Problem::new(ProblemId::new(42), "Missing", "", "");
    let error = workspace.open_problem(unknown).await.expect_err("no cases");
    assert_eq!(error.kind, PracticeErrorKind::TestCaseLoad);

    let error = workspace.submit("code").await.expect_err("not ready");
    assert_eq!(error.kind, PracticeErrorKind::NotReady);
    assert_eq!(judge.count(JudgeOperation::Execute), 0);
}

#[tokio::test]
async fn opening_another_problem_cancels_running_hint() {
    let sum = Problem::new(ProblemId::new(2), "Sum", "Add two numbers", "a, b");
    let judge = Arc::new(
        FakeJudge::default()
            .with_problem(fizzbuzz(), two_cases())
            .with_problem(sum.clone(), vec![TestCase::new(vec!["1".to_string()], "1")])
            .hint(Ok(0.5), vec![Ok("Think about ".to_string())])
            .stalled_hints(),
    );
    let (workspace, hooks) = workspace(Arc::clone(&judge));
    workspace.open_problem(fizzbuzz()).await.expect("open");
    let mut updates = workspace.hint_updates();

    let (session, opened) = tokio::join!(workspace.request_hint("code"), async {
        updates
            .wait_for(|session| session.text == "Think about ")
            .await
            .expect("sender alive");
        workspace.open_problem(sum.clone()).await
    });
    opened.expect("open second");

    let session = session.expect("hint");
    assert_eq!(session.phase, HintPhase::Cancelled);
    assert_eq!(session.text, "Think about ");
    assert!(session.error.is_none());

    let view = workspace.view().expect("view");
    assert_eq!(view.problem.map(|p| p.id), Some(ProblemId::new(2)));
    assert_eq!(view.hint.phase, HintPhase::Cancelled);
    assert!(view.hint.error.is_none());
    assert!(!view.hint.is_loading());

    let events = hooks.events();
    assert!(events.contains(&"hint:Cancelled".to_string()));
    assert!(!events.contains(&"hint:Errored".to_string()));
}
