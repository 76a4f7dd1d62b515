//! Shared identifiers and async aliases for workspace crates.
//!
//! ```rust
//! use acommon::{ProblemId, SequenceCounter};
//!
//! let problem = ProblemId::new(7);
//! let counter = SequenceCounter::new();
//! let first = counter.issue();
//! let second = counter.issue();
//!
//! assert_eq!(problem.to_string(), "7");
//! assert!(second > first);
//! assert!(counter.is_latest(second));
//! assert!(!counter.is_latest(first));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use acommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod ids {
    //! Problem identifiers and monotonically issued sequence numbers.
    //!
    //! ```rust
    //! use acommon::{ProblemId, SequenceNumber};
    //!
    //! let id = ProblemId::from(3);
    //! assert_eq!(id.get(), 3);
    //! assert!(SequenceNumber::new(2) > SequenceNumber::new(1));
    //! ```

    use std::fmt::{Display, Formatter};
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ProblemId(i64);

    impl ProblemId {
        pub const fn new(value: i64) -> Self {
            Self(value)
        }

        pub const fn get(self) -> i64 {
            self.0
        }
    }

    impl Display for ProblemId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl From<i64> for ProblemId {
        fn from(value: i64) -> Self {
            Self(value)
        }
    }

    /// Tag attached to an in-flight request. Zero is never issued.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct SequenceNumber(u64);

    impl SequenceNumber {
        pub const fn new(value: u64) -> Self {
            Self(value)
        }

        pub const fn get(self) -> u64 {
            self.0
        }
    }

    impl Display for SequenceNumber {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "#{}", self.0)
        }
    }

    /// Issues strictly increasing sequence numbers and remembers the latest one.
    #[derive(Debug, Default)]
    pub struct SequenceCounter {
        latest: AtomicU64,
    }

    impl SequenceCounter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn issue(&self) -> SequenceNumber {
            SequenceNumber(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
        }

        pub fn latest(&self) -> SequenceNumber {
            SequenceNumber(self.latest.load(Ordering::SeqCst))
        }

        pub fn is_latest(&self, sequence: SequenceNumber) -> bool {
            self.latest() == sequence
        }
    }
}

pub use future::BoxFuture;
pub use ids::{ProblemId, SequenceCounter, SequenceNumber};

#[cfg(test)]
mod tests {
    use super::{ProblemId, SequenceCounter, SequenceNumber};

    #[test]
    fn problem_id_displays_raw_value() {
        let id = ProblemId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(ProblemId::from(42), id);
    }

    #[test]
    fn sequence_counter_issues_increasing_numbers() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.latest(), SequenceNumber::default());

        let first = counter.issue();
        let second = counter.issue();
        let third = counter.issue();

        assert_eq!(first, SequenceNumber::new(1));
        assert!(first < second && second < third);
        assert!(counter.is_latest(third));
        assert!(!counter.is_latest(second));
        assert_eq!(third.to_string(), "#3");
    }
}
