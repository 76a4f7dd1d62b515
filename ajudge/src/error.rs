//! Judge error kinds and error value helpers.
//!
//! ```rust
//! use ajudge::{JudgeError, JudgeErrorKind};
//!
//! let rejected = JudgeError::from_status(404, "problem not found");
//! assert_eq!(rejected.kind, JudgeErrorKind::ClientStatus);
//! assert!(!rejected.retryable);
//!
//! let throttled = JudgeError::from_status(429, "slow down");
//! assert!(throttled.retryable);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeErrorKind {
    InvalidRequest,
    /// 4xx other than 429. Never retried.
    ClientStatus,
    RateLimited,
    Timeout,
    Transport,
    Unavailable,
    MalformedResponse,
    Other,
}

impl JudgeErrorKind {
    /// Throttling, gateway, and network failures that may clear on their own.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Timeout | Self::Transport | Self::Unavailable
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeError {
    pub kind: JudgeErrorKind,
    pub message: String,
    pub retryable: bool,
    pub status: Option<u16>,
}

impl JudgeError {
    pub fn new(kind: JudgeErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            status: None,
        }
    }

    fn of(kind: JudgeErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, kind.is_transient())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::of(JudgeErrorKind::InvalidRequest, message)
    }

    pub fn client_status(message: impl Into<String>) -> Self {
        Self::of(JudgeErrorKind::ClientStatus, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::of(JudgeErrorKind::RateLimited, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::of(JudgeErrorKind::Timeout, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::of(JudgeErrorKind::Transport, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::of(JudgeErrorKind::Unavailable, message)
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::of(JudgeErrorKind::MalformedResponse, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::of(JudgeErrorKind::Other, message)
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let error = match status {
            429 => Self::rate_limited(message),
            408 | 504 => Self::timeout(message),
            502 | 503 => Self::unavailable(message),
            400..=499 => Self::client_status(message),
            _ => Self::transport(message),
        };

        error.with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_client_error(&self) -> bool {
        self.kind == JudgeErrorKind::ClientStatus
    }
}

impl Display for JudgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for JudgeError {}
