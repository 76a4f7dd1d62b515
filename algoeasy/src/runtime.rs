//! Runtime wiring helpers for the practice workspace.

use std::sync::Arc;

use crate::{
    JudgeConfig, JudgeError, JudgeTransport, MetricsObservabilityHooks, PracticeObservers,
    PracticeWorkspace, SafeJudgeHooks, SafePracticeHooks, TracingObservabilityHooks,
    build_transport_with_config,
};

/// Structured-log observers. Panicking hooks never reach the flows.
pub fn tracing_observers() -> PracticeObservers {
    PracticeObservers::new(
        Arc::new(SafePracticeHooks::new(TracingObservabilityHooks)),
        Arc::new(SafeJudgeHooks::new(TracingObservabilityHooks)),
    )
}

pub fn metrics_observers() -> PracticeObservers {
    PracticeObservers::new(
        Arc::new(SafePracticeHooks::new(MetricsObservabilityHooks)),
        Arc::new(SafeJudgeHooks::new(MetricsObservabilityHooks)),
    )
}

pub fn practice_workspace(transport: Arc<dyn JudgeTransport>) -> PracticeWorkspace {
    PracticeWorkspace::builder(transport)
        .observers(tracing_observers())
        .build()
}

pub fn build_workspace(config: JudgeConfig) -> Result<PracticeWorkspace, JudgeError> {
    build_workspace_with(config, tracing_observers())
}

pub fn build_workspace_from_env() -> Result<PracticeWorkspace, JudgeError> {
    build_workspace(JudgeConfig::from_env()?)
}

pub fn build_workspace_with(
    config: JudgeConfig,
    observers: PracticeObservers,
) -> Result<PracticeWorkspace, JudgeError> {
    let hint_open_retry = config.stream_open_retry.clone();
    let transport = build_transport_with_config(config)?;

    Ok(PracticeWorkspace::builder(transport)
        .observers(observers)
        .hint_open_retry(hint_open_retry)
        .build())
}
