//! Production-friendly observability hooks for judge calls and practice flows.
//!
//! ```rust
//! use std::sync::Arc;
//! use aobserve::{MetricsObservabilityHooks, SafeJudgeHooks, TracingObservabilityHooks};
//! use apractice::PracticeObservers;
//!
//! let _judge_hooks = SafeJudgeHooks::new(TracingObservabilityHooks);
//! let _observers = PracticeObservers::shared(Arc::new(MetricsObservabilityHooks));
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeJudgeHooks, SafePracticeHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeJudgeHooks, SafePracticeHooks, TracingObservabilityHooks,
    };
}
