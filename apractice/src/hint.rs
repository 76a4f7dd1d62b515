//! Two-phase hint flow: a similarity probe followed by an incrementally
//! streamed hint, published as `HintSession` snapshots.
//!
//! ```text
//! Idle -> Probing -> Streaming -> Done
//!            |           |
//!            +-> Errored <+        (abort from Probing/Streaming -> Cancelled)
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use acommon::{ProblemId, SequenceCounter, SequenceNumber};
use ajudge::{
    CodeRequest, JudgeOperation, JudgeTransport, RetryPolicy, execute_operation,
    execute_with_retry,
};
use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{PracticeError, PracticeObservers};

/// Similarity scores below this mark the attempt as novel.
pub const NOVELTY_THRESHOLD: f64 = 0.1;

/// Appended after any partial hint text when the stream breaks.
pub const STREAM_FAILURE_NOTICE: &str = "[Hint generation failed. Please try again.]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintPhase {
    #[default]
    Idle,
    Probing,
    Streaming,
    Done,
    Errored,
    Cancelled,
}

impl HintPhase {
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Probing | Self::Streaming)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HintSession {
    pub generation: SequenceNumber,
    pub phase: HintPhase,
    pub text: String,
    pub was_novel_attempt: bool,
    pub error: Option<PracticeError>,
}

impl HintSession {
    fn started(generation: SequenceNumber) -> Self {
        Self {
            generation,
            phase: HintPhase::Probing,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }
}

struct ActiveHint {
    generation: SequenceNumber,
    token: CancellationToken,
}

pub struct HintStreamClient {
    transport: Arc<dyn JudgeTransport>,
    observers: PracticeObservers,
    open_retry: RetryPolicy,
    generations: SequenceCounter,
    active: Mutex<Option<ActiveHint>>,
    session: watch::Sender<HintSession>,
}

impl HintStreamClient {
    pub fn new(transport: Arc<dyn JudgeTransport>) -> Self {
        Self::with_observers(transport, PracticeObservers::default())
    }

    pub fn with_observers(transport: Arc<dyn JudgeTransport>, observers: PracticeObservers) -> Self {
        let (session, _) = watch::channel(HintSession::default());
        Self {
            transport,
            observers,
            open_retry: RetryPolicy::stream_open(),
            generations: SequenceCounter::new(),
            active: Mutex::new(None),
            session,
        }
    }

    /// Retry policy for opening the stream. Throttling, server errors, and
    /// network failures are retried; client errors never are.
    pub fn with_open_retry(mut self, policy: RetryPolicy) -> Self {
        self.open_retry = policy;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<HintSession> {
        self.session.subscribe()
    }

    pub fn session(&self) -> HintSession {
        self.session.borrow().clone()
    }

    /// Runs a fresh hint session to completion and returns its final state.
    ///
    /// Any session still in flight is cancelled first, and the published
    /// session is replaced wholesale. Superseded or aborted sessions stop
    /// publishing and return with `HintPhase::Cancelled`.
    pub async fn request(&self, code: impl Into<String>, problem_id: ProblemId) -> HintSession {
        let (mut session, token) = match self.begin() {
            Ok(started) => started,
            Err(error) => {
                return HintSession {
                    phase: HintPhase::Errored,
                    text: error.message.clone(),
                    error: Some(error),
                    ..HintSession::default()
                };
            }
        };
        let request = CodeRequest::new(code, problem_id);

        let probe = tokio::select! {
            biased;
            _ = token.cancelled() => return self.cancelled(session),
            probe = execute_operation(
                JudgeOperation::FindSimilar,
                self.observers.judge.as_ref(),
                |_| self.transport.find_similar(request.clone()),
            ) => probe,
        };

        match probe {
            Ok(score) => {
                session.was_novel_attempt = score < NOVELTY_THRESHOLD;
                self.transition(&mut session, &token, HintPhase::Streaming);
            }
            Err(err) => {
                session.text = err.message.clone();
                session.error = Some(PracticeError::hint_failed(&err));
                self.transition(&mut session, &token, HintPhase::Errored);
                return self.finish(session);
            }
        }

        let opened = tokio::select! {
            biased;
            _ = token.cancelled() => return self.cancelled(session),
            opened = execute_with_retry(
                JudgeOperation::OpenHintStream,
                &self.open_retry,
                self.observers.judge.as_ref(),
                |_| self.transport.open_hint_stream(request.clone()),
                tokio::time::sleep,
            ) => opened,
        };

        let mut fragments = match opened {
            Ok(fragments) => fragments,
            Err(err) => {
                append_failure_notice(&mut session.text);
                session.error = Some(PracticeError::hint_failed(&err));
                self.transition(&mut session, &token, HintPhase::Errored);
                return self.finish(session);
            }
        };

        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => return self.cancelled(session),
                next = fragments.next() => next,
            };

            match next {
                Some(Ok(fragment)) => {
                    session.text.push_str(&fragment);
                    self.observers
                        .practice
                        .on_hint_fragment(session.generation, fragment.len());
                    self.publish(&session, &token);
                }
                Some(Err(err)) => {
                    append_failure_notice(&mut session.text);
                    session.error = Some(PracticeError::hint_failed(&err));
                    self.transition(&mut session, &token, HintPhase::Errored);
                    break;
                }
                None => {
                    self.transition(&mut session, &token, HintPhase::Done);
                    break;
                }
            }
        }

        self.finish(session)
    }

    /// Stops the in-flight session, if any, without marking it as errored.
    pub fn abort(&self) {
        let Ok(mut active) = self.lock_active() else {
            return;
        };
        let Some(aborted) = active.take() else {
            return;
        };
        aborted.token.cancel();
        drop(active);

        let cancelled = self.session.send_if_modified(|session| {
            if session.generation != aborted.generation || !session.phase.is_loading() {
                return false;
            }
            session.phase = HintPhase::Cancelled;
            true
        });

        if cancelled {
            self.observers
                .practice
                .on_hint_phase(aborted.generation, HintPhase::Cancelled);
        }
    }

    fn begin(&self) -> Result<(HintSession, CancellationToken), PracticeError> {
        let mut active = self.lock_active()?;
        let generation = self.generations.issue();
        let token = CancellationToken::new();

        if let Some(previous) = active.replace(ActiveHint {
            generation,
            token: token.clone(),
        }) {
            previous.token.cancel();
        }

        let session = HintSession::started(generation);
        self.session.send_replace(session.clone());
        drop(active);

        self.observers
            .practice
            .on_hint_phase(generation, HintPhase::Probing);
        Ok((session, token))
    }

    fn transition(&self, session: &mut HintSession, token: &CancellationToken, phase: HintPhase) {
        session.phase = phase;
        if self.publish(session, token) {
            self.observers
                .practice
                .on_hint_phase(session.generation, phase);
        }
    }

    /// Writes `session` unless a newer session replaced it or it was aborted.
    fn publish(&self, session: &HintSession, token: &CancellationToken) -> bool {
        self.session.send_if_modified(|current| {
            if current.generation != session.generation || token.is_cancelled() {
                return false;
            }
            *current = session.clone();
            true
        })
    }

    fn cancelled(&self, mut session: HintSession) -> HintSession {
        session.phase = HintPhase::Cancelled;
        self.finish(session)
    }

    fn finish(&self, session: HintSession) -> HintSession {
        if let Ok(mut active) = self.lock_active() {
            if active
                .as_ref()
                .is_some_and(|current| current.generation == session.generation)
            {
                *active = None;
            }
        }
        session
    }

    fn lock_active(&self) -> Result<MutexGuard<'_, Option<ActiveHint>>, PracticeError> {
        self.active
            .lock()
            .map_err(|_| PracticeError::state("hint session lock poisoned"))
    }
}

fn append_failure_notice(text: &mut String) {
    if !text.is_empty() {
        text.push_str("\n\n");
    }
    text.push_str(STREAM_FAILURE_NOTICE);
}

impl std::fmt::Debug for HintStreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HintStreamClient")
            .field("transport", &self.transport)
            .field("open_retry", &self.open_retry)
            .field("session", &*self.session.borrow())
            .finish_non_exhaustive()
    }
}
