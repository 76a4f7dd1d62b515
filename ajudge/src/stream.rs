//! Hint fragment stream contract.
//!
//! ```rust
//! use ajudge::{BoxedFragmentStream, JudgeError};
//! use futures_util::stream;
//!
//! let fragments = stream::iter(vec![Ok::<_, JudgeError>("Try ".to_string())]);
//! let _boxed: BoxedFragmentStream<'static> = Box::pin(fragments);
//! ```

use std::pin::Pin;

use futures_core::Stream;

use crate::JudgeError;

/// Hint stream contract.
///
/// Invariants for consumers:
/// - Fragments are yielded in arrival order and are meant to be appended.
/// - An `Err` item means the connection failed; nothing follows it.
/// - `None` means the server closed the stream cleanly.
pub trait HintFragmentStream: Stream<Item = Result<String, JudgeError>> + Send {}

impl<T> HintFragmentStream for T where T: Stream<Item = Result<String, JudgeError>> + Send {}

pub type BoxedFragmentStream<'a> = Pin<Box<dyn HintFragmentStream + 'a>>;
