//! Judge connection settings, with environment overrides.
//!
//! ```rust
//! use std::time::Duration;
//! use ajudge::JudgeConfig;
//!
//! let config = JudgeConfig::new("http://judge.internal:9000/")
//!     .with_submission_timeout(Duration::from_secs(45));
//!
//! assert_eq!(config.endpoint("execute/"), "http://judge.internal:9000/execute/");
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::{JudgeError, RetryPolicy};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const JUDGE_URL_ENV: &str = "ALGOEASY_JUDGE_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "ALGOEASY_REQUEST_TIMEOUT_SECS";
pub const SUBMISSION_TIMEOUT_ENV: &str = "ALGOEASY_SUBMISSION_TIMEOUT_SECS";
pub const STREAM_IDLE_TIMEOUT_ENV: &str = "ALGOEASY_STREAM_IDLE_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_ENV: &str = "ALGOEASY_CONNECT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct JudgeConfig {
    pub base_url: String,
    /// Problem listing, test-case fetch, similarity probe, and stream open.
    pub request_timeout: Duration,
    pub submission_timeout: Duration,
    /// Longest silence tolerated between two chunks of an open hint stream.
    pub stream_idle_timeout: Duration,
    pub connect_timeout: Duration,
    pub stream_open_retry: RetryPolicy,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            submission_timeout: Duration::from_secs(30),
            stream_idle_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(5),
            stream_open_retry: RetryPolicy::stream_open(),
        }
    }
}

impl JudgeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, JudgeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, JudgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(JUDGE_URL_ENV) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(value) = lookup(REQUEST_TIMEOUT_ENV) {
            config.request_timeout = parse_secs(REQUEST_TIMEOUT_ENV, &value)?;
        }

        if let Some(value) = lookup(SUBMISSION_TIMEOUT_ENV) {
            config.submission_timeout = parse_secs(SUBMISSION_TIMEOUT_ENV, &value)?;
        }

        if let Some(value) = lookup(STREAM_IDLE_TIMEOUT_ENV) {
            config.stream_idle_timeout = parse_secs(STREAM_IDLE_TIMEOUT_ENV, &value)?;
        }

        if let Some(value) = lookup(CONNECT_TIMEOUT_ENV) {
            config.connect_timeout = parse_secs(CONNECT_TIMEOUT_ENV, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_submission_timeout(mut self, timeout: Duration) -> Self {
        self.submission_timeout = timeout;
        self
    }

    pub fn with_stream_idle_timeout(mut self, timeout: Duration) -> Self {
        self.stream_idle_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_stream_open_retry(mut self, policy: RetryPolicy) -> Self {
        self.stream_open_retry = policy;
        self
    }

    pub fn validate(&self) -> Result<(), JudgeError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(JudgeError::invalid_request("judge base URL must not be empty"));
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(JudgeError::invalid_request(format!(
                "judge base URL must use http or https: {base_url}"
            )));
        }

        let timeouts = [
            self.request_timeout,
            self.submission_timeout,
            self.stream_idle_timeout,
            self.connect_timeout,
        ];
        if timeouts.iter().any(Duration::is_zero) {
            return Err(JudgeError::invalid_request("judge timeouts must be non-zero"));
        }

        Ok(())
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, JudgeError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| JudgeError::invalid_request(format!("{key} must be whole seconds, got '{value}'")))
}
