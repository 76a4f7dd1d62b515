//! Small convenience helpers for presenting practice state.

use crate::{HintPhase, PassSummary, ProblemId, Tone, Verdict};

pub fn parse_problem_id(value: &str) -> Option<ProblemId> {
    value.trim().parse::<i64>().ok().map(ProblemId::new)
}

pub fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Untested => "untested",
        Verdict::NoVerdict => "no verdict",
        Verdict::Passed => "passed",
        Verdict::Failed => "failed",
    }
}

pub fn tone_label(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "neutral",
        Tone::Positive => "positive",
        Tone::Negative => "negative",
    }
}

pub fn summary_label(summary: PassSummary) -> String {
    format!("{}/{} passed", summary.passed, summary.total)
}

pub fn hint_status_label(phase: HintPhase) -> &'static str {
    match phase {
        HintPhase::Idle => "",
        HintPhase::Probing => "Checking your approach...",
        HintPhase::Streaming => "Generating hint...",
        HintPhase::Done => "Hint ready",
        HintPhase::Errored => "Hint failed",
        HintPhase::Cancelled => "Hint cancelled",
    }
}
